//! Tenor adapter. Implements MediaSearch via the Tenor v2 search endpoint.

use crate::domain::{DomainError, MediaResult};
use crate::ports::MediaSearch;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Tenor API adapter for GIF search.
///
/// Requires an API key from the Google Cloud console (Tenor API).
pub struct TenorAdapter {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl TenorAdapter {
    /// # Arguments
    /// * `base_url` - API root (e.g. "https://tenor.googleapis.com/v2")
    /// * `api_key` - Tenor API key
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    media_formats: MediaFormats,
}

#[derive(Deserialize, Default)]
struct MediaFormats {
    gif: Option<MediaFormat>,
}

#[derive(Deserialize)]
struct MediaFormat {
    url: String,
}

impl From<SearchResult> for MediaResult {
    fn from(r: SearchResult) -> Self {
        MediaResult {
            gif_url: r.media_formats.gif.map(|g| g.url),
        }
    }
}

#[async_trait::async_trait]
impl MediaSearch for TenorAdapter {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<MediaResult>, DomainError> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();

        let res = self
            .client
            .get(&url)
            .query(&[("q", query), ("key", self.api_key.as_str()), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::Media(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Media(format!(
                "Tenor API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: SearchResponse = res
            .json()
            .await
            .map_err(|e| DomainError::Media(format!("Failed to parse Tenor response: {}", e)))?;

        debug!(query, results = body.results.len(), "tenor search complete");
        Ok(body.results.into_iter().map(MediaResult::from).collect())
    }
}
