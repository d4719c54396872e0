#![allow(dead_code)]

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use trip_planner_api::config::AppConfig;
use trip_planner_api::routes;
use trip_planner_api::services::{
    geocoding_service::GeocodingService, places_service::PlacesService,
    trip_planner_service::TripPlanner, wikipedia_service::WikipediaService,
};

pub const TEST_API_KEY: &str = "test-geoapify-key";

/// Every query the mock upstream received, by endpoint.
#[derive(Default)]
pub struct RequestLog {
    pub geocode_texts: Mutex<Vec<String>>,
    pub place_queries: Mutex<Vec<HashMap<String, String>>>,
    pub wikipedia_queries: Mutex<Vec<String>>,
}

impl RequestLog {
    pub fn place_categories(&self) -> Vec<String> {
        self.place_queries
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.get("categories").cloned().unwrap_or_default())
            .collect()
    }

    pub fn wikipedia_queries(&self) -> Vec<String> {
        self.wikipedia_queries.lock().unwrap().clone()
    }
}

pub struct TestApp {
    pub config: AppConfig,
    pub upstream: Arc<RequestLog>,
}

impl TestApp {
    /// Starts a stand-in for Geoapify and Wikipedia on an ephemeral port.
    /// Must be called inside an actix runtime.
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let upstream = Arc::new(RequestLog::default());
        let data = web::Data::from(upstream.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/v1/geocode/search", web::get().to(mock_geocode))
                .route("/v2/places", web::get().to(mock_places))
                .route("/w/rest.php/v1/search/title", web::get().to(mock_title_search))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind mock upstream");

        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());

        let config = AppConfig::with_upstream(&format!("http://{}", addr), TEST_API_KEY);
        Self { config, upstream }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let planner = TripPlanner::new(
            Arc::new(GeocodingService::new(&self.config).unwrap()),
            Arc::new(PlacesService::new(&self.config).unwrap()),
            Arc::new(WikipediaService::new(&self.config).unwrap()),
        );

        App::new()
            .app_data(web::Data::new(planner))
            .app_data(web::Data::new(self.config.clone()))
            .configure(routes::configure)
    }
}

// Regions the mock geocoder knows about.
pub const GOA: (f64, f64) = (15.4909, 73.8278);
pub const JAIPUR: (f64, f64) = (26.9124, 75.7873);
pub const EMPTYVILLE: (f64, f64) = (10.0, 10.0);
pub const STORMVILLE: (f64, f64) = (20.0, 20.0);

async fn mock_geocode(
    log: web::Data<RequestLog>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    if query.get("apiKey").map(String::as_str) != Some(TEST_API_KEY) {
        return HttpResponse::Unauthorized().json(json!({ "error": "Invalid apiKey" }));
    }

    let text = query.get("text").cloned().unwrap_or_default();
    log.geocode_texts.lock().unwrap().push(text.clone());

    match text.as_str() {
        "Goa, India" => HttpResponse::Ok().json(json!({
            "results": [{ "lat": GOA.0, "lon": GOA.1, "formatted": "Goa, India" }]
        })),
        // GeoJSON shape: [lon, lat]
        "Jaipur, India" => HttpResponse::Ok().json(json!({
            "type": "FeatureCollection",
            "features": [{
                "properties": { "name": "Jaipur" },
                "geometry": { "type": "Point", "coordinates": [JAIPUR.1, JAIPUR.0] }
            }]
        })),
        "Emptyville, India" => HttpResponse::Ok().json(json!({
            "results": [{ "lat": EMPTYVILLE.0, "lon": EMPTYVILLE.1 }]
        })),
        "Stormville, India" => HttpResponse::Ok().json(json!({
            "results": [{ "lat": STORMVILLE.0, "lon": STORMVILLE.1 }]
        })),
        "Brokenville, India" => HttpResponse::InternalServerError().body("upstream exploded"),
        _ => HttpResponse::Ok().json(json!({ "results": [] })),
    }
}

/// Eight features per category, the first without a name. Searches
/// centred on Emptyville find nothing; searches around Stormville fail.
async fn mock_places(
    log: web::Data<RequestLog>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let query = query.into_inner();
    log.place_queries.lock().unwrap().push(query.clone());

    let filter = query.get("filter").cloned().unwrap_or_default();
    if filter.starts_with(&format!("circle:{},{},", EMPTYVILLE.1, EMPTYVILLE.0)) {
        return HttpResponse::Ok().json(json!({ "type": "FeatureCollection", "features": [] }));
    }
    if filter.starts_with(&format!("circle:{},{},", STORMVILLE.1, STORMVILLE.0)) {
        return HttpResponse::InternalServerError().body("places backend down");
    }

    let categories = query.get("categories").cloned().unwrap_or_default();
    let mut features = vec![json!({
        "properties": { "formatted": "Unnamed spot" },
        "geometry": { "type": "Point", "coordinates": [GOA.1, GOA.0] }
    })];
    for i in 1..8 {
        features.push(json!({
            "properties": {
                "name": format!("{} {}", categories, i),
                "formatted": format!("{} Street, Goa", i),
                "lat": GOA.0 + i as f64 / 8.0,
                "lon": GOA.1
            },
            "geometry": { "type": "Point", "coordinates": [GOA.1, GOA.0] }
        }));
    }

    HttpResponse::Ok().json(json!({ "type": "FeatureCollection", "features": features }))
}

async fn mock_title_search(
    req: HttpRequest,
    log: web::Data<RequestLog>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    if req.headers().get("user-agent").is_none() {
        return HttpResponse::Forbidden().body("User-Agent required");
    }

    let q = query.get("q").cloned().unwrap_or_default();
    log.wikipedia_queries.lock().unwrap().push(q);

    HttpResponse::Ok().json(json!({
        "pages": [
            { "id": 1, "key": "Emptyville_Fort", "title": "Emptyville Fort" },
            { "id": 2, "key": "Emptyville_Lake", "title": "Emptyville Lake" }
        ]
    }))
}
