//! Geoapify places search.
//!
//! Looks up points of interest inside a circle around a coordinate and
//! normalises each GeoJSON feature to a [`PlaceResult`]. Features without a
//! name are dropped. Any transport or status failure yields an empty list.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::place::{Coordinate, PlaceResult};
use crate::services::interface::{PlaceOperations, PlaceQuery};
use crate::services::source_error::SourceError;

const PLACES_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Feature {
    #[serde(default)]
    pub properties: FeatureProperties,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeatureProperties {
    pub name: Option<String>,
    pub formatted: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Geometry {
    // Left untyped: non-point geometries nest their arrays.
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

impl Geometry {
    /// GeoJSON stores `[lon, lat]`.
    pub fn point(&self) -> Option<Coordinate> {
        let pair = self.coordinates.as_array()?;
        let lon = pair.first()?.as_f64()?;
        let lat = pair.get(1)?.as_f64()?;
        Some(Coordinate::new(lat, lon))
    }
}

impl Feature {
    /// Property-level lat/lon wins over the geometry point.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let point = self.geometry.as_ref().and_then(Geometry::point);
        let lat = self.properties.lat.or(point.map(|p| p.lat))?;
        let lon = self.properties.lon.or(point.map(|p| p.lon))?;
        Some(Coordinate::new(lat, lon))
    }

    fn into_place(self) -> Option<PlaceResult> {
        let location = self.coordinate();
        let name = self.properties.name.filter(|name| !name.is_empty())?;
        let location = match location {
            Some(location) => location,
            None => {
                debug!("Skipping '{}': no usable coordinates", name);
                return None;
            }
        };
        let address = self.properties.formatted.unwrap_or_default();
        Some(PlaceResult::at(name, address, location))
    }
}

pub(crate) fn normalize_features(collection: FeatureCollection) -> Vec<PlaceResult> {
    collection
        .features
        .into_iter()
        .filter_map(Feature::into_place)
        .collect()
}

#[derive(Clone)]
pub struct PlacesService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PlacesService {
    pub fn new(config: &AppConfig) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(PLACES_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.geoapify_base_url.clone(),
            api_key: config.geoapify_api_key.clone(),
        })
    }

    pub async fn try_find_places(
        &self,
        center: Coordinate,
        query: &PlaceQuery,
    ) -> Result<Vec<PlaceResult>, SourceError> {
        let url = format!("{}/v2/places", self.base_url);
        let filter = format!("circle:{},{},{}", center.lon, center.lat, query.radius_m);
        let bias = format!("proximity:{},{}", center.lon, center.lat);
        let limit = query.limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("categories", query.joined_categories().as_str()),
                ("filter", filter.as_str()),
                ("bias", bias.as_str()),
                ("limit", limit.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let collection: FeatureCollection = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        let places = normalize_features(collection);
        for place in &places {
            if let Some(location) = place.location {
                debug!(
                    "{} is {:.1} km from the search centre",
                    place.name,
                    center.distance_km(&location)
                );
            }
        }
        Ok(places)
    }
}

#[async_trait]
impl PlaceOperations for PlacesService {
    async fn find_places(&self, center: Coordinate, query: &PlaceQuery) -> Vec<PlaceResult> {
        match self.try_find_places(center, query).await {
            Ok(places) => {
                debug!(
                    "Places search [{}] returned {} results",
                    query.joined_categories(),
                    places.len()
                );
                places
            }
            Err(e) if e.is_timeout() => {
                warn!(
                    "Places search [{}] timed out after {:?}",
                    query.joined_categories(),
                    PLACES_TIMEOUT
                );
                Vec::new()
            }
            Err(e) => {
                warn!("Places search [{}] failed: {}", query.joined_categories(), e);
                Vec::new()
            }
        }
    }
}
