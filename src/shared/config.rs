//! Application configuration. API credentials, channel ids, source paths.
//!
//! `AppConfig` is the raw, all-optional view read from the environment;
//! `Settings` is the validated form handed to adapters and services.

use crate::domain::{DomainError, SourceLocation};
use serde::Deserialize;
use std::fmt;

/// Number of top GIF results to pick from.
pub const DEFAULT_TENOR_LIMIT: u32 = 10;

pub const DEFAULT_TENOR_BASE_URL: &str = "https://tenor.googleapis.com/v2";

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

pub const DEFAULT_PROMPT_PATH: &str = "prompt.txt";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Discord bot token. Read from DISCORD_TOKEN.
    #[serde(default)]
    pub discord_token: Option<String>,

    /// Channel that receives birthday posts. Read from CHANNEL_ID.
    #[serde(default)]
    pub channel_id: Option<String>,

    /// Channel that receives the heartbeat post. Read from HEARTBEAT_CHANNEL_ID.
    #[serde(default)]
    pub heartbeat_channel_id: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Tenor
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from TENOR_API_KEY.
    #[serde(default)]
    pub tenor_api_key: Option<String>,

    /// Search term, e.g. "birthday celebration". Read from TENOR_QUERY.
    #[serde(default)]
    pub tenor_query: Option<String>,

    /// Read from TENOR_LIMIT (default 10).
    #[serde(default)]
    pub tenor_limit: Option<String>,

    /// Read from TENOR_BASE_URL.
    #[serde(default)]
    pub tenor_base_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Anthropic
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from CLAUDE_API_KEY.
    #[serde(default)]
    pub claude_api_key: Option<String>,

    /// Read from CLAUDE_MODEL.
    #[serde(default)]
    pub claude_model: Option<String>,

    /// Prompt file, local path or s3:// URI. Read from CLAUDE_PROMPT_PATH.
    #[serde(default)]
    pub claude_prompt_path: Option<String>,

    /// Read from ANTHROPIC_BASE_URL.
    #[serde(default)]
    pub anthropic_base_url: Option<String>,

    /// Roster CSV, local path or s3:// URI. Read from DATA_PATH.
    #[serde(default)]
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Load from `BIRTHDAY_BOT_*` variables, an optional config file named by
    /// BIRTHDAY_BOT_CONFIG, then the plain variable names (DISCORD_TOKEN, ...).
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("BIRTHDAY_BOT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("BIRTHDAY_BOT"));
        let mut cfg: Self = c.build()?.try_deserialize()?;
        cfg.fill_from_plain_env();
        Ok(cfg)
    }

    fn fill_from_plain_env(&mut self) {
        fill(&mut self.discord_token, "DISCORD_TOKEN");
        fill(&mut self.channel_id, "CHANNEL_ID");
        fill(&mut self.heartbeat_channel_id, "HEARTBEAT_CHANNEL_ID");
        fill(&mut self.tenor_api_key, "TENOR_API_KEY");
        fill(&mut self.tenor_query, "TENOR_QUERY");
        fill(&mut self.tenor_limit, "TENOR_LIMIT");
        fill(&mut self.tenor_base_url, "TENOR_BASE_URL");
        fill(&mut self.claude_api_key, "CLAUDE_API_KEY");
        fill(&mut self.claude_model, "CLAUDE_MODEL");
        fill(&mut self.claude_prompt_path, "CLAUDE_PROMPT_PATH");
        fill(&mut self.anthropic_base_url, "ANTHROPIC_BASE_URL");
        fill(&mut self.data_path, "DATA_PATH");
    }

    /// Validate into `Settings`. Reports every missing required key at once.
    pub fn into_settings(self) -> Result<Settings, DomainError> {
        let mut missing = Vec::new();
        let mut require = |value: Option<String>, name: &'static str| -> String {
            match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                Some(v) => v,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let discord_token = require(self.discord_token, "DISCORD_TOKEN");
        let channel_id = require(self.channel_id, "CHANNEL_ID");
        let heartbeat_channel_id = require(self.heartbeat_channel_id, "HEARTBEAT_CHANNEL_ID");
        let tenor_api_key = require(self.tenor_api_key, "TENOR_API_KEY");
        let tenor_query = require(self.tenor_query, "TENOR_QUERY");
        let claude_api_key = require(self.claude_api_key, "CLAUDE_API_KEY");
        let claude_model = require(self.claude_model, "CLAUDE_MODEL");
        let data_path = require(self.data_path, "DATA_PATH");

        if !missing.is_empty() {
            return Err(DomainError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        let tenor_limit = match self.tenor_limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_TENOR_LIMIT,
            Some(s) => s
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    DomainError::Config(format!("TENOR_LIMIT must be a positive integer: {}", s))
                })?,
        };

        Ok(Settings {
            discord_token,
            channel_id: parse_channel_id(&channel_id, "CHANNEL_ID")?,
            heartbeat_channel_id: parse_channel_id(&heartbeat_channel_id, "HEARTBEAT_CHANNEL_ID")?,
            tenor_api_key,
            tenor_query,
            tenor_limit,
            tenor_base_url: self
                .tenor_base_url
                .unwrap_or_else(|| DEFAULT_TENOR_BASE_URL.to_string()),
            claude_api_key,
            claude_model,
            anthropic_base_url: self
                .anthropic_base_url
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            prompt_source: self
                .claude_prompt_path
                .as_deref()
                .unwrap_or(DEFAULT_PROMPT_PATH)
                .parse()?,
            data_source: data_path.parse()?,
        })
    }
}

fn fill(slot: &mut Option<String>, var: &str) {
    if slot.is_none() {
        if let Ok(v) = std::env::var(var) {
            *slot = Some(v);
        }
    }
}

fn parse_channel_id(raw: &str, name: &str) -> Result<u64, DomainError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| DomainError::Config(format!("{} must be a non-zero integer: {}", name, raw)))
}

/// Validated configuration. Built once at start and passed by reference.
#[derive(Clone)]
pub struct Settings {
    pub discord_token: String,
    pub channel_id: u64,
    pub heartbeat_channel_id: u64,
    pub tenor_api_key: String,
    pub tenor_query: String,
    pub tenor_limit: u32,
    pub tenor_base_url: String,
    pub claude_api_key: String,
    pub claude_model: String,
    pub anthropic_base_url: String,
    pub prompt_source: SourceLocation,
    pub data_source: SourceLocation,
}

// Secrets stay out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("discord_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("heartbeat_channel_id", &self.heartbeat_channel_id)
            .field("tenor_api_key", &"<redacted>")
            .field("tenor_query", &self.tenor_query)
            .field("tenor_limit", &self.tenor_limit)
            .field("tenor_base_url", &self.tenor_base_url)
            .field("claude_api_key", &"<redacted>")
            .field("claude_model", &self.claude_model)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("prompt_source", &self.prompt_source)
            .field("data_source", &self.data_source)
            .finish()
    }
}
