//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// File or object does not exist. Kept apart from other I/O failures.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Source read failed: {0}")]
    Source(String),

    #[error("Roster error: {0}")]
    Roster(String),

    #[error("Chat gateway error: {0}")]
    Chat(String),

    #[error("Text generation failed: {0}")]
    TextGen(String),

    #[error("Media search failed: {0}")]
    Media(String),
}
