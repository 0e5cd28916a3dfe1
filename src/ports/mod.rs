//! Port traits. API boundaries for the hexagon.
//!
//! All ports are outbound: the birthday run calls into infrastructure.

pub mod outbound;

pub use outbound::{ChatGateway, FileSource, MediaSearch, TextGenerator};
