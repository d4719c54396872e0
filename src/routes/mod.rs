use actix_web::web;

pub mod health;
pub mod index;
pub mod trip;

/// Installs the whole route table; shared by `main` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(trip::json_config())
        .route("/", web::get().to(index::index))
        .route("/health", web::get().to(health::health_check))
        .route("/plan_trip", web::post().to(trip::plan_trip));
}
