//! Builds a [`TripPlan`] for one request.
//!
//! Geocoding is the only step that can fail the request. Once the region is
//! resolved, attractions, stays and restaurants are looked up concurrently;
//! each of those degrades on its own (attractions fall back to Wikipedia,
//! stays to a placeholder, restaurants may stay empty). Pricing runs last on
//! the stays that came back.

use futures::join;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;
use thiserror::Error;

use crate::models::place::{Coordinate, PlaceResult};
use crate::models::trip::{Mood, TripParams, TripPlan};
use crate::services::interface::{
    AttractionFallbackOperations, GeocodeOperations, PlaceOperations, PlaceQuery,
};
use crate::services::pricing_service::PricingService;
use crate::services::stay_service::StayService;

const RESTAURANT_CATEGORIES: &[&str] = &["catering.restaurant"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Could not geocode region")]
    GeocodeFailed,
}

#[derive(Clone)]
pub struct TripPlanner {
    geocoder: Arc<dyn GeocodeOperations>,
    places: Arc<dyn PlaceOperations>,
    fallback: Arc<dyn AttractionFallbackOperations>,
    stays: StayService,
}

impl TripPlanner {
    pub fn new(
        geocoder: Arc<dyn GeocodeOperations>,
        places: Arc<dyn PlaceOperations>,
        fallback: Arc<dyn AttractionFallbackOperations>,
    ) -> Self {
        let stays = StayService::new(places.clone());
        Self {
            geocoder,
            places,
            fallback,
            stays,
        }
    }

    pub async fn plan_trip(&self, params: &TripParams) -> Result<TripPlan, PlanError> {
        let mut rng = StdRng::from_entropy();
        self.plan_trip_with_rng(params, &mut rng).await
    }

    pub async fn plan_trip_with_rng<R: Rng>(
        &self,
        params: &TripParams,
        rng: &mut R,
    ) -> Result<TripPlan, PlanError> {
        let center = self
            .geocoder
            .geocode(&params.region)
            .await
            .ok_or(PlanError::GeocodeFailed)?;

        let restaurant_query = PlaceQuery::new(RESTAURANT_CATEGORIES);
        let (attractions, stays, restaurants) = join!(
            self.find_attractions(center, &params.region, &params.mood),
            self.stays.recommend_stays(center, &params.mood, rng),
            self.places
                .find_places(center, &restaurant_query),
        );

        let avg_price = PricingService::average_stay_price(&stays);
        let estimated_cost = PricingService::estimate_cost(params.days, avg_price, rng);

        info!(
            "Planned {} day '{}' trip to {}: {} stays, {} attractions, {} restaurants, {} INR",
            params.days,
            params.mood.as_str(),
            params.region,
            stays.len(),
            attractions.len(),
            restaurants.len(),
            estimated_cost.total_inr
        );

        Ok(TripPlan {
            region: params.region.clone(),
            coordinates: center,
            mood: params.mood.as_str().to_string(),
            days: params.days,
            stays,
            attractions,
            restaurants,
            estimated_cost,
        })
    }

    async fn find_attractions(
        &self,
        center: Coordinate,
        region: &str,
        mood: &Mood,
    ) -> Vec<PlaceResult> {
        let attractions = self
            .places
            .find_places(center, &PlaceQuery::new(mood.attraction_categories()))
            .await;
        if !attractions.is_empty() {
            return attractions;
        }

        info!("No attractions near {}, using Wikipedia fallback", region);
        self.fallback.fallback_attractions(region).await
    }
}
