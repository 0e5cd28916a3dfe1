//! Discord adapter. Implements ChatGateway over serenity's REST client.

pub mod gateway;
pub mod mapper;

pub use gateway::DiscordGateway;
