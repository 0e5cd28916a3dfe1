//! Domain entities. Pure data structures for the core business.
//!
//! No Discord/HTTP types here — these are mapped from adapters.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::DomainError;

/// One roster line: a chat login name and a birthdate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub username: String,
    pub birthday: NaiveDate,
}

impl RosterRow {
    /// True when the birthday falls on the same month and day as `date` (any year).
    pub fn celebrates_on(&self, date: NaiveDate) -> bool {
        MonthDay::from(self.birthday) == MonthDay::from(date)
    }
}

/// Month and day of a date, the key birthdays are matched on. Displays as `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl From<NaiveDate> for MonthDay {
    fn from(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// A postable channel, as resolved by the chat gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: u64,
    /// Guild the channel belongs to; `None` for DMs and other guild-less channels.
    pub guild_id: Option<u64>,
    pub name: String,
}

/// A member of the channel's guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Login name, matched exactly against roster usernames.
    pub name: String,
    /// Platform markup that renders as a clickable reference (e.g. `<@123>`).
    pub mention: String,
}

/// Where a text resource (roster, prompt) lives. Parsed once at config load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Local(PathBuf),
    ObjectStore { bucket: String, key: String },
}

const S3_SCHEME: &str = "s3://";

impl FromStr for SourceLocation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::Config("empty source path".into()));
        }
        let Some(rest) = s.strip_prefix(S3_SCHEME) else {
            return Ok(Self::Local(PathBuf::from(s)));
        };
        let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
        let key = key.trim_start_matches('/');
        if bucket.is_empty() || key.is_empty() {
            return Err(DomainError::Config(format!(
                "malformed object store path (expected s3://bucket/key): {}",
                s
            )));
        }
        Ok(Self::ObjectStore {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::ObjectStore { bucket, key } => write!(f, "{}{}/{}", S3_SCHEME, bucket, key),
        }
    }
}

/// One media search hit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaResult {
    /// Animated GIF rendition; some results only carry other formats.
    pub gif_url: Option<String>,
}

/// Single-turn text generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}
