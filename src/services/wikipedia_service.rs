use async_trait::async_trait;
use log::{info, warn};
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::place::PlaceResult;
use crate::services::interface::AttractionFallbackOperations;
use crate::services::source_error::SourceError;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const SEARCH_LIMIT: &str = "10";
const ARTICLE_BASE_URL: &str = "https://en.wikipedia.org/wiki";

#[derive(Debug, Deserialize)]
struct TitleSearchResponse {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
}

fn pages_to_places(response: TitleSearchResponse, region: &str) -> Vec<PlaceResult> {
    response
        .pages
        .into_iter()
        .map(|page| PlaceResult {
            map_url: format!("{}/{}", ARTICLE_BASE_URL, page.title),
            name: page.title,
            address: region.to_string(),
            location: None,
        })
        .collect()
}

/// Title search on Wikipedia, used when the places provider has no
/// attractions for a region.
#[derive(Clone)]
pub struct WikipediaService {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl WikipediaService {
    pub fn new(config: &AppConfig) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(SEARCH_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.wikipedia_base_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    pub async fn try_search(&self, region: &str) -> Result<Vec<PlaceResult>, SourceError> {
        let url = format!("{}/w/rest.php/v1/search/title", self.base_url);
        let q = format!("Tourist attractions in {} India", region);

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, self.user_agent.as_str())
            .query(&[("q", q.as_str()), ("limit", SEARCH_LIMIT)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: TitleSearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(pages_to_places(body, region))
    }
}

#[async_trait]
impl AttractionFallbackOperations for WikipediaService {
    async fn fallback_attractions(&self, region: &str) -> Vec<PlaceResult> {
        match self.try_search(region).await {
            Ok(places) => {
                info!(
                    "Wikipedia fallback found {} attractions for '{}'",
                    places.len(),
                    region
                );
                places
            }
            Err(e) => {
                warn!("Wikipedia fallback failed for '{}': {}", region, e);
                Vec::new()
            }
        }
    }
}
