use log::{debug, info};
use rand::Rng;
use std::sync::Arc;

use crate::models::place::{Coordinate, PlaceResult, Stay};
use crate::models::trip::Mood;
use crate::services::interface::{PlaceOperations, PlaceQuery};

const MAX_STAYS: usize = 5;
const BROAD_ACCOMMODATION: &[&str] = &["accommodation"];
const PLACEHOLDER_ADDRESS: &str = "City Center";

/// Picks accommodation for a mood: the mood's categories first, then any
/// accommodation, then a single synthetic placeholder.
#[derive(Clone)]
pub struct StayService {
    places: Arc<dyn PlaceOperations>,
}

impl StayService {
    pub fn new(places: Arc<dyn PlaceOperations>) -> Self {
        Self { places }
    }

    /// Always returns between 1 and 5 stays.
    pub async fn recommend_stays<R: Rng>(
        &self,
        center: Coordinate,
        mood: &Mood,
        rng: &mut R,
    ) -> Vec<Stay> {
        let found = self.search(center, mood).await;
        price_stays(found, center, mood, rng)
    }

    async fn search(&self, center: Coordinate, mood: &Mood) -> Vec<PlaceResult> {
        let found = self
            .places
            .find_places(center, &PlaceQuery::new(mood.stay_categories()))
            .await;
        if !found.is_empty() {
            return found;
        }

        info!(
            "No '{}' stays found, trying broad accommodation search",
            mood.as_str()
        );
        self.places
            .find_places(center, &PlaceQuery::new(BROAD_ACCOMMODATION))
            .await
    }
}

pub fn placeholder_name(mood: &Mood) -> String {
    format!("Default {} Stay (No Geoapify Results)", mood.title())
}

fn price_stays<R: Rng>(
    found: Vec<PlaceResult>,
    center: Coordinate,
    mood: &Mood,
    rng: &mut R,
) -> Vec<Stay> {
    let range = mood.price_range();

    if found.is_empty() {
        info!("Broad accommodation search also empty, returning placeholder stay");
        let placeholder = PlaceResult::at(
            placeholder_name(mood),
            PLACEHOLDER_ADDRESS.to_string(),
            center,
        );
        return vec![Stay::priced(placeholder, rng.gen_range(range))];
    }

    let stays: Vec<Stay> = found
        .into_iter()
        .map(|place| Stay::priced(place, rng.gen_range(range.clone())))
        .take(MAX_STAYS)
        .collect();
    debug!("Priced {} stays for '{}'", stays.len(), mood.as_str());
    stays
}
