//! Implements ChatGateway using serenity's HTTP client.
//!
//! A scheduled run only needs request/response calls, so no gateway shard is
//! started: `connect` validates the token, `close` drops the session.

use crate::adapters::discord::mapper;
use crate::domain::{ChannelRef, DomainError, Member};
use crate::ports::ChatGateway;
use async_trait::async_trait;
use serenity::http::{Http, HttpError};
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Discord caps guild member pages at 1000.
const MEMBERS_PAGE_SIZE: u64 = 1000;

/// Discord gateway adapter. Wraps a shared serenity Http client.
pub struct DiscordGateway {
    http: Arc<Http>,
    connected: AtomicBool,
}

impl DiscordGateway {
    pub fn new(token: &str) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
            connected: AtomicBool::new(false),
        }
    }

    fn ensure_connected(&self) -> Result<(), DomainError> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(DomainError::Chat("gateway is not connected".into()))
        }
    }
}

/// True for responses that mean "no such channel for this bot" rather than a failure.
fn is_missing(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp))
            if matches!(resp.status_code.as_u16(), 403 | 404)
    )
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    async fn connect(&self) -> Result<(), DomainError> {
        let me = self
            .http
            .get_current_user()
            .await
            .map_err(|e| DomainError::Chat(format!("login failed: {}", e)))?;
        self.connected.store(true, Ordering::Release);
        info!(bot = %me.name, "connected to Discord");
        Ok(())
    }

    async fn resolve_channel(&self, channel_id: u64) -> Result<Option<ChannelRef>, DomainError> {
        self.ensure_connected()?;
        if channel_id == 0 {
            return Ok(None);
        }
        match self.http.get_channel(ChannelId::new(channel_id)).await {
            Ok(channel) => Ok(Some(mapper::channel_to_domain(&channel))),
            Err(e) if is_missing(&e) => {
                debug!(channel_id, error = %e, "channel not visible");
                Ok(None)
            }
            Err(e) => Err(DomainError::Chat(format!(
                "get channel {} failed: {}",
                channel_id, e
            ))),
        }
    }

    async fn channel_members(&self, channel: &ChannelRef) -> Result<Vec<Member>, DomainError> {
        let guild_id = channel.guild_id.ok_or_else(|| {
            DomainError::Chat(format!("channel {} does not belong to a guild", channel.id))
        })?;
        self.ensure_connected()?;
        let guild = GuildId::new(guild_id);

        let mut members = Vec::new();
        let mut after: Option<UserId> = None;
        loop {
            let page = guild
                .members(&self.http, Some(MEMBERS_PAGE_SIZE), after)
                .await
                .map_err(|e| DomainError::Chat(format!("list members of {} failed: {}", guild_id, e)))?;
            let page_len = page.len();
            after = page.last().map(|m| m.user.id);
            members.extend(page.iter().map(mapper::member_to_domain));
            if (page_len as u64) < MEMBERS_PAGE_SIZE || after.is_none() {
                break;
            }
        }

        debug!(guild_id, count = members.len(), "fetched guild members");
        Ok(members)
    }

    async fn send(&self, channel: &ChannelRef, content: &str) -> Result<(), DomainError> {
        self.ensure_connected()?;
        ChannelId::new(channel.id)
            .say(&self.http, content)
            .await
            .map_err(|e| DomainError::Chat(format!("send to {} failed: {}", channel.id, e)))?;
        Ok(())
    }

    async fn close(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            info!("disconnected from Discord");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dm_channel() -> ChannelRef {
        ChannelRef {
            id: 42,
            guild_id: None,
            name: String::new(),
        }
    }

    #[tokio::test]
    async fn test_channel_members_requires_guild() {
        let gateway = DiscordGateway::new("token");
        let err = gateway.channel_members(&dm_channel()).await.unwrap_err();
        assert!(matches!(err, DomainError::Chat(_)));
        assert!(err.to_string().contains("does not belong to a guild"), "{}", err);
    }

    #[tokio::test]
    async fn test_calls_before_connect_fail() {
        let gateway = DiscordGateway::new("token");
        let guild_channel = ChannelRef {
            guild_id: Some(7),
            ..dm_channel()
        };
        assert!(gateway.channel_members(&guild_channel).await.is_err());
        assert!(gateway.send(&guild_channel, "hi").await.is_err());
        assert!(gateway.resolve_channel(42).await.is_err());
        // close without connect is a no-op
        gateway.close().await;
    }
}
