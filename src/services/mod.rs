pub mod geocoding_service;
pub mod interface;
pub mod places_service;
pub mod pricing_service;
pub mod source_error;
pub mod stay_service;
pub mod trip_planner_service;
pub mod wikipedia_service;
