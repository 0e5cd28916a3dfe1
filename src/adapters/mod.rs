//! Infrastructure adapters. Implement outbound ports.
//!
//! Discord, Anthropic, Tenor, file/object storage. Map errors to DomainError.

pub mod ai;
pub mod discord;
pub mod integrations;
pub mod roster;
pub mod storage;
