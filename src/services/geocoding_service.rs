use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::place::Coordinate;
use crate::services::interface::GeocodeOperations;
use crate::services::places_service::Feature;
use crate::services::source_error::SourceError;

const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);
const COUNTRY_QUALIFIER: &str = "India";

// Either shape may be missing or explicitly null.
#[derive(Debug, Default, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeResult>>,
    #[serde(default)]
    features: Option<Vec<Feature>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    lat: f64,
    lon: f64,
}

impl GeocodeResponse {
    /// `results[0]` first, then the GeoJSON `features[0]` geometry.
    fn first_coordinate(&self) -> Option<Coordinate> {
        if let Some(result) = self.results.iter().flatten().next() {
            return Some(Coordinate::new(result.lat, result.lon));
        }
        self.features
            .iter()
            .flatten()
            .next()
            .and_then(|feature| feature.geometry.as_ref())
            .and_then(|geometry| geometry.point())
    }
}

#[derive(Clone)]
pub struct GeocodingService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodingService {
    pub fn new(config: &AppConfig) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(GEOCODE_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.geoapify_base_url.clone(),
            api_key: config.geoapify_api_key.clone(),
        })
    }

    pub async fn try_geocode(&self, place: &str) -> Result<Option<Coordinate>, SourceError> {
        let url = format!("{}/v1/geocode/search", self.base_url);
        let text = format!("{}, {}", place, COUNTRY_QUALIFIER);

        let response = self
            .client
            .get(&url)
            .query(&[("text", text.as_str()), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(body.first_coordinate())
    }
}

#[async_trait]
impl GeocodeOperations for GeocodingService {
    async fn geocode(&self, place: &str) -> Option<Coordinate> {
        match self.try_geocode(place).await {
            Ok(Some(coordinate)) => {
                info!(
                    "Geocoded '{}' to ({:.4}, {:.4})",
                    place, coordinate.lat, coordinate.lon
                );
                Some(coordinate)
            }
            Ok(None) => {
                warn!("Geocoder found no match for '{}'", place);
                None
            }
            Err(e) => {
                warn!("Geocode error for '{}': {}", place, e);
                None
            }
        }
    }
}
