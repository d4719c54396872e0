use actix_web::{error::InternalError, web, HttpRequest, HttpResponse, Responder};
use log::warn;
use serde_json::json;

use crate::models::trip::TripRequest;
use crate::services::trip_planner_service::TripPlanner;

/*
    /plan_trip
*/
pub async fn plan_trip(
    planner: web::Data<TripPlanner>,
    input: web::Json<TripRequest>,
) -> impl Responder {
    let params = match input.into_inner().validate() {
        Ok(params) => params,
        Err(err) => {
            warn!("Rejected trip request: {}", err);
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    match planner.plan_trip(&params).await {
        Ok(plan) => HttpResponse::Ok().json(plan),
        Err(err) => HttpResponse::BadRequest().json(json!({ "error": err.to_string() })),
    }
}

/// Malformed bodies get the same `{"error": ...}` shape as every other 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = format!("Invalid request body: {}", err);
        warn!("{}", message);
        let response = HttpResponse::BadRequest().json(json!({ "error": message }));
        InternalError::from_response(err, response).into()
    })
}
