use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::AppConfig;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    /health
*/
pub async fn health_check(config: web::Data<AppConfig>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let geoapify_result = check_geoapify(&config);
    health
        .services
        .insert("geoapify".to_string(), geoapify_result.clone());

    health
        .services
        .insert("wikipedia".to_string(), check_wikipedia(&config));

    // Wikipedia is only a fallback; a missing Geoapify key degrades everything.
    if geoapify_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

/// `AppConfig::from_env` refuses to start without a key, so the error branch
/// only shows up for configs built in code.
fn check_geoapify(config: &AppConfig) -> ServiceStatus {
    if config.geoapify_api_key.trim().is_empty() {
        return ServiceStatus {
            status: "error".to_string(),
            details: Some("GEOAPIFY_API_KEY not configured".to_string()),
        };
    }

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "Geoapify configured at {} ({})",
            config.geoapify_base_url,
            config.masked_api_key()
        )),
    }
}

fn check_wikipedia(config: &AppConfig) -> ServiceStatus {
    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "Fallback search at {} as {}",
            config.wikipedia_base_url, config.user_agent
        )),
    }
}
