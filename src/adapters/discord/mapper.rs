//! Map serenity model types to domain entities.

use crate::domain::{ChannelRef, Member};
use serenity::model::channel::Channel;
use serenity::model::guild::Member as GuildMember;
use serenity::model::mention::Mentionable;

/// Map a serenity Channel to a postable ChannelRef.
///
/// * `Channel::Guild` → carries the guild id (members can be listed).
/// * anything else (DMs) → no guild; member lookup will fail for it.
pub fn channel_to_domain(channel: &Channel) -> ChannelRef {
    match channel {
        Channel::Guild(gc) => ChannelRef {
            id: gc.id.get(),
            guild_id: Some(gc.guild_id.get()),
            name: gc.name.clone(),
        },
        other => ChannelRef {
            id: other.id().get(),
            guild_id: None,
            name: String::new(),
        },
    }
}

/// Map a guild member. `name` is the login name, not the server nickname.
pub fn member_to_domain(member: &GuildMember) -> Member {
    Member {
        name: member.user.name.clone(),
        mention: member.mention().to_string(),
    }
}
