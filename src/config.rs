use std::env;

use thiserror::Error;
use url::Url;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 5050;
const GEOAPIFY_BASE_URL: &str = "https://api.geoapify.com";
const WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org";
const USER_AGENT: &str = "TripPlannerBot/1.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),

    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Process-wide settings, read once at startup and shared read-only with
/// every outbound service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub geoapify_api_key: String,
    pub geoapify_base_url: String,
    pub wikipedia_base_url: String,
    pub user_agent: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let geoapify_api_key = env::var("GEOAPIFY_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("GEOAPIFY_API_KEY"))?;

        let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| PORT.to_string())
            .parse()
            .unwrap_or(PORT);

        let geoapify_base_url = base_url_from_env("GEOAPIFY_BASE_URL", GEOAPIFY_BASE_URL)?;
        let wikipedia_base_url = base_url_from_env("WIKIPEDIA_BASE_URL", WIKIPEDIA_BASE_URL)?;
        let user_agent = env::var("USER_AGENT").unwrap_or_else(|_| USER_AGENT.to_string());

        Ok(Self {
            host,
            port,
            geoapify_api_key,
            geoapify_base_url,
            wikipedia_base_url,
            user_agent,
        })
    }

    /// Config pointing both upstreams at the same base, used to aim the
    /// services at a local stand-in.
    pub fn with_upstream(base_url: &str, geoapify_api_key: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            host: HOST.to_string(),
            port: PORT,
            geoapify_api_key: geoapify_api_key.to_string(),
            geoapify_base_url: base.clone(),
            wikipedia_base_url: base,
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn masked_api_key(&self) -> String {
        let key = &self.geoapify_api_key;
        if key.chars().count() > 8 {
            let head: String = key.chars().take(4).collect();
            let mut tail: Vec<char> = key.chars().rev().take(4).collect();
            tail.reverse();
            format!("{}***{}", head, tail.into_iter().collect::<String>())
        } else {
            "***".to_string()
        }
    }
}

fn base_url_from_env(name: &'static str, default: &str) -> Result<String, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { name, source })?;
    Ok(raw.trim_end_matches('/').to_string())
}
