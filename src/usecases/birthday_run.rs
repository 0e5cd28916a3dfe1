//! The daily run: heartbeat → main channel → roster → per celebrant (GIF, message) → close.
//!
//! - Heartbeat problems are logged and ignored
//! - Main channel or roster problems end the run
//! - Unknown usernames and GIF failures are skipped; any other error in the
//!   celebrant loop ends the run
//! - The gateway is closed on every path

use crate::domain::{ChannelRef, DomainError, Member};
use crate::ports::ChatGateway;
use crate::usecases::{MediaPicker, MessageComposer, RosterService};
use chrono::NaiveDateTime;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Heartbeat text for a run started at `now` (local time).
pub fn heartbeat_text(now: NaiveDateTime) -> String {
    format!("🤖 Script executed at {}", now.format("%Y-%m-%d %H:%M:%S"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every celebrant was processed (greeted or skipped).
    Completed,
    NoCelebrants,
    /// Main channel could not be resolved; nobody was processed.
    ChannelUnavailable,
    /// A fatal error ended the run early.
    Failed(String),
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::NoCelebrants => write!(f, "no celebrants"),
            Self::ChannelUnavailable => write!(f, "channel unavailable"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// What a run did. Logged at the end; `Failed` maps to a non-zero exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub status: RunStatus,
    pub heartbeat_sent: bool,
    pub celebrants: Vec<String>,
    pub greeted: Vec<String>,
    pub skipped: Vec<String>,
    pub gifs_posted: usize,
}

impl RunReport {
    fn new() -> Self {
        Self {
            status: RunStatus::Completed,
            heartbeat_sent: false,
            celebrants: Vec::new(),
            greeted: Vec::new(),
            skipped: Vec::new(),
            gifs_posted: 0,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, RunStatus::Failed(_))
    }
}

/// Channel ids the run posts to.
#[derive(Debug, Clone, Copy)]
pub struct RunTargets {
    pub channel_id: u64,
    pub heartbeat_channel_id: u64,
}

/// Workflow driver. All posting goes through `chat`; one celebrant at a time.
pub struct BirthdayRun {
    chat: Arc<dyn ChatGateway>,
    roster: RosterService,
    composer: MessageComposer,
    picker: MediaPicker,
    targets: RunTargets,
}

impl BirthdayRun {
    pub fn new(
        chat: Arc<dyn ChatGateway>,
        roster: RosterService,
        composer: MessageComposer,
        picker: MediaPicker,
        targets: RunTargets,
    ) -> Self {
        Self {
            chat,
            roster,
            composer,
            picker,
            targets,
        }
    }

    /// Execute one pass. Never returns an error: failures end up in the report.
    pub async fn run(&self, now: NaiveDateTime) -> RunReport {
        let mut report = RunReport::new();

        match self.chat.connect().await {
            Ok(()) => {
                if let Err(e) = self.drive(now, &mut report).await {
                    error!(error = %e, "birthday run aborted");
                    report.status = RunStatus::Failed(e.to_string());
                }
            }
            Err(e) => {
                error!(error = %e, "failed to connect to chat platform");
                report.status = RunStatus::Failed(e.to_string());
            }
        }

        self.chat.close().await;
        info!(
            status = %report.status,
            heartbeat = report.heartbeat_sent,
            celebrants = report.celebrants.len(),
            greeted = report.greeted.len(),
            skipped = report.skipped.len(),
            gifs = report.gifs_posted,
            "run finished"
        );
        report
    }

    async fn drive(&self, now: NaiveDateTime, report: &mut RunReport) -> Result<(), DomainError> {
        report.heartbeat_sent = self.heartbeat(now).await;

        let channel = match self.chat.resolve_channel(self.targets.channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                error!(channel_id = self.targets.channel_id, "could not find channel");
                report.status = RunStatus::ChannelUnavailable;
                return Ok(());
            }
            Err(e) => {
                error!(channel_id = self.targets.channel_id, error = %e, "could not resolve channel");
                report.status = RunStatus::ChannelUnavailable;
                return Ok(());
            }
        };

        let celebrants = self.roster.celebrants(now.date()).await?;
        report.celebrants = celebrants.clone();
        if celebrants.is_empty() {
            info!("no birthdays today");
            report.status = RunStatus::NoCelebrants;
            return Ok(());
        }

        let members = self.chat.channel_members(&channel).await?;
        for username in &celebrants {
            match find_member(&members, username) {
                Some(member) => {
                    if self.greet(&channel, member).await? {
                        report.gifs_posted += 1;
                    }
                    report.greeted.push(username.clone());
                }
                None => {
                    warn!(username = %username, "could not find user in the server");
                    report.skipped.push(username.clone());
                }
            }
        }
        report.status = RunStatus::Completed;
        Ok(())
    }

    /// Best-effort liveness post. Returns whether it was delivered.
    async fn heartbeat(&self, now: NaiveDateTime) -> bool {
        let channel_id = self.targets.heartbeat_channel_id;
        let channel = match self.chat.resolve_channel(channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                error!(channel_id, "could not find heartbeat channel");
                return false;
            }
            Err(e) => {
                error!(channel_id, error = %e, "could not resolve heartbeat channel");
                return false;
            }
        };
        match self.chat.send(&channel, &heartbeat_text(now)).await {
            Ok(()) => true,
            Err(e) => {
                error!(channel_id, error = %e, "failed to send heartbeat message");
                false
            }
        }
    }

    /// GIF first (if any), then the message. Returns whether a GIF was posted.
    async fn greet(&self, channel: &ChannelRef, member: &Member) -> Result<bool, DomainError> {
        let gif_posted = match self.picker.pick().await {
            Some(url) => match self.chat.send(channel, &url).await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "failed to post GIF");
                    false
                }
            },
            None => false,
        };
        let message = self.composer.compose(&member.mention).await;
        self.chat.send(channel, &message).await?;
        info!(member = %member.name, gif = gif_posted, "birthday message sent");
        Ok(gif_posted)
    }
}

/// Exact, case-sensitive login-name match. First match wins.
fn find_member<'a>(members: &'a [Member], username: &str) -> Option<&'a Member> {
    members.iter().find(|m| m.name == username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_heartbeat_text() {
        let now = NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(7, 5, 9)
            .unwrap();
        assert_eq!(heartbeat_text(now), "🤖 Script executed at 2026-03-14 07:05:09");
    }

    #[test]
    fn test_find_member_is_exact() {
        let members = vec![
            Member {
                name: "Alice".into(),
                mention: "<@1>".into(),
            },
            Member {
                name: "alice".into(),
                mention: "<@2>".into(),
            },
        ];
        assert_eq!(find_member(&members, "alice").map(|m| m.mention.as_str()), Some("<@2>"));
        assert!(find_member(&members, "ALICE").is_none());
        assert!(find_member(&members, "ali").is_none());
    }
}
