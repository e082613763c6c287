//! HTTP client for the external music catalog search.

use anyhow::{bail, Context, Result};
use std::time::Duration;
use tracing::debug;

use super::models::SearchResponse;

pub const ITUNES_SEARCH_URL: &str = "https://itunes.apple.com/search";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const DEFAULT_TIMEOUT_SEC: u64 = 10;

pub struct CatalogClient {
    client: reqwest::Client,
    search_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Arguments
    /// * `search_url` - Full URL of the search endpoint
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(search_url: String, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, search_url })
    }

    /// Searches songs matching `term`. A blank term yields no results
    /// without contacting the catalog.
    pub async fn search(&self, term: &str, limit: u32) -> Result<SearchResponse> {
        if term.trim().is_empty() {
            return Ok(SearchResponse::default());
        }

        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("term", term),
                ("media", "music"),
                ("entity", "song"),
                ("limit", limit.as_str()),
                ("explicit", "Yes"),
            ])
            .send()
            .await
            .context("Failed to search for music, please check your connection")?;

        if !response.status().is_success() {
            bail!("Catalog search failed with status: {}", response.status());
        }

        let results: SearchResponse = response
            .json()
            .await
            .context("Failed to parse catalog search response")?;
        debug!("Catalog search \"{}\" returned {} tracks", term, results.result_count);
        Ok(results)
    }
}
