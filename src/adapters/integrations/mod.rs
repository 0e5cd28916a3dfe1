//! Third-party REST integrations.

pub mod tenor;

pub use tenor::TenorAdapter;
