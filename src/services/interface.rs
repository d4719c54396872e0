use async_trait::async_trait;

use crate::models::place::{Coordinate, PlaceResult};

const DEFAULT_RADIUS_M: u32 = 15000;
const DEFAULT_LIMIT: u32 = 30;

/// One places search: categories around a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery {
    pub categories: Vec<String>,
    pub radius_m: u32,
    pub limit: u32,
}

impl PlaceQuery {
    pub fn new(categories: &[&str]) -> Self {
        Self {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            radius_m: DEFAULT_RADIUS_M,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn joined_categories(&self) -> String {
        self.categories.join(",")
    }
}

#[async_trait]
pub trait GeocodeOperations: Send + Sync {
    /// `None` when the place could not be resolved for any reason.
    async fn geocode(&self, place: &str) -> Option<Coordinate>;
}

#[async_trait]
pub trait PlaceOperations: Send + Sync {
    /// Places in provider order; empty on any failure.
    async fn find_places(&self, center: Coordinate, query: &PlaceQuery) -> Vec<PlaceResult>;
}

#[async_trait]
pub trait AttractionFallbackOperations: Send + Sync {
    async fn fallback_attractions(&self, region: &str) -> Vec<PlaceResult>;
}
