//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ChannelRef, DomainError, GenerationRequest, MediaResult, Member, SourceLocation};

/// Chat platform gateway. Connection lifecycle, channel lookup, posting.
#[async_trait::async_trait]
pub trait ChatGateway: Send + Sync {
    /// Authenticate with the platform. Must be called before any other method.
    async fn connect(&self) -> Result<(), DomainError>;

    /// Look up a channel by id. `Ok(None)` when the channel does not exist or
    /// is not visible to the bot.
    async fn resolve_channel(&self, channel_id: u64) -> Result<Option<ChannelRef>, DomainError>;

    /// All members of the guild the channel belongs to.
    async fn channel_members(&self, channel: &ChannelRef) -> Result<Vec<Member>, DomainError>;

    /// Post a text message (or a bare media URL, which the platform embeds).
    async fn send(&self, channel: &ChannelRef, content: &str) -> Result<(), DomainError>;

    /// Release the connection. Idempotent.
    async fn close(&self);
}

/// Text generation service (LLM).
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for a single user prompt. Returns the raw text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError>;
}

/// Media search service (animated GIFs).
#[async_trait::async_trait]
pub trait MediaSearch: Send + Sync {
    /// Return up to `limit` top results for `query`.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<MediaResult>, DomainError>;
}

/// Reads whole text resources from a local path or an object store.
#[async_trait::async_trait]
pub trait FileSource: Send + Sync {
    /// Read the resource as UTF-8, trimmed of surrounding whitespace.
    ///
    /// # Errors
    /// `DomainError::NotFound` when the file/object does not exist,
    /// `DomainError::Source` for any other failure.
    async fn read_text(&self, location: &SourceLocation) -> Result<String, DomainError>;
}
