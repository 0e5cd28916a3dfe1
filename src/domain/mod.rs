//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    ChannelRef, GenerationRequest, MediaResult, Member, MonthDay, RosterRow, SourceLocation,
};
pub use errors::DomainError;
