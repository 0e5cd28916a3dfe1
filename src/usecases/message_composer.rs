//! Birthday message composition. Prompt → text generation → mention + body.
//!
//! Never fails: every error degrades to the fixed fallback greeting.

use crate::domain::{DomainError, GenerationRequest, SourceLocation};
use crate::ports::{FileSource, TextGenerator};
use std::sync::Arc;
use tracing::{error, info};

/// Output cap for the generated greeting.
pub const MAX_TOKENS: u32 = 150;

/// High temperature so greetings vary from run to run.
pub const TEMPERATURE: f32 = 0.9;

/// Greeting used whenever generation is not possible.
pub fn fallback_message(mention: &str) -> String {
    format!("{} 🎉 Happy Birthday! 🎂", mention)
}

pub struct MessageComposer {
    source: Arc<dyn FileSource>,
    prompt_location: SourceLocation,
    generator: Arc<dyn TextGenerator>,
}

impl MessageComposer {
    pub fn new(
        source: Arc<dyn FileSource>,
        prompt_location: SourceLocation,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            source,
            prompt_location,
            generator,
        }
    }

    /// Ready-to-post message for `mention`. The mention is used as given.
    pub async fn compose(&self, mention: &str) -> String {
        match self.generate_body().await {
            Ok(body) => format!("{} {}", mention, body),
            Err(e) => {
                match &e {
                    DomainError::NotFound(_) => error!(error = %e, "failed to find prompt file"),
                    DomainError::Source(_) => error!(error = %e, "failed to read prompt file"),
                    _ => error!(error = %e, "failed to generate birthday message"),
                }
                fallback_message(mention)
            }
        }
    }

    async fn generate_body(&self) -> Result<String, DomainError> {
        // Read on every call so prompt edits apply without a restart.
        let prompt = self.source.read_text(&self.prompt_location).await?;
        if prompt.is_empty() {
            return Err(DomainError::Source(format!(
                "prompt file is empty: {}",
                self.prompt_location
            )));
        }

        let request = GenerationRequest {
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let body = self.generator.generate(&request).await?;
        let body = body.trim();
        if body.is_empty() {
            return Err(DomainError::TextGen("empty completion".into()));
        }
        info!(len = body.len(), "birthday message generated");
        Ok(body.to_string())
    }
}
