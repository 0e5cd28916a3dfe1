//! Anthropic Messages API adapter.
//!
//! Implements `TextGenerator` with a single non-streaming request and picks
//! the first text block out of the response.

use crate::domain::{DomainError, GenerationRequest};
use crate::ports::TextGenerator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const API_VERSION: &str = "2023-06-01";

/// Anthropic adapter.
pub struct AnthropicAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicAdapter {
    /// Create a new Anthropic adapter.
    ///
    /// # Arguments
    /// * `base_url` - API root without path (e.g. "https://api.anthropic.com")
    /// * `api_key` - sent as `x-api-key`
    /// * `model` - model id
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    /// First text block of the response, trimmed. Non-text blocks are skipped.
    fn extract_text(response: MessagesResponse) -> Option<String> {
        response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .find_map(|block| block.text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// Messages API request structure.
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Messages API response structure.
#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[async_trait::async_trait]
impl TextGenerator for AnthropicAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        info!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            "requesting birthday message"
        );

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![RequestMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::TextGen(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Anthropic API returned error");
            return Err(DomainError::TextGen(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DomainError::TextGen(format!("Failed to parse API response: {}", e)))?;

        let text = Self::extract_text(parsed)
            .ok_or_else(|| DomainError::TextGen("No text content returned".to_string()))?;
        debug!(len = text.len(), "received generated text");
        Ok(text)
    }
}
