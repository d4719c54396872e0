use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;

use trip_planner_api::config::AppConfig;
use trip_planner_api::routes;
use trip_planner_api::services::{
    geocoding_service::GeocodingService, places_service::PlacesService,
    trip_planner_service::TripPlanner, wikipedia_service::WikipediaService,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let planner = TripPlanner::new(
        Arc::new(GeocodingService::new(&config).map_err(io::Error::other)?),
        Arc::new(PlacesService::new(&config).map_err(io::Error::other)?),
        Arc::new(WikipediaService::new(&config).map_err(io::Error::other)?),
    );

    let host = config.host.clone();
    let port = config.port;
    info!("Geoapify key {}", config.masked_api_key());
    info!("Attempting to bind to {}:{}", host, port);

    let planner = web::Data::new(planner);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(planner.clone())
            .app_data(config.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
