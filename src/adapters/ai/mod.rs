//! AI adapter module. Implements TextGenerator for LLM integration.

pub mod anthropic_adapter;

pub use anthropic_adapter::AnthropicAdapter;
