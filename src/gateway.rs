//! The slice of the Discord API the bot talks to.
//!
//! Everything the handlers need from Discord goes through the [`Gateway`]
//! trait, implemented for serenity's [`Http`] client. Handlers only see the
//! small summary records below, never serenity's own model types, so they
//! can be driven by an in-memory gateway in tests.

use serenity::async_trait;
use serenity::builder::CreateMessage;
use serenity::http::{GuildPagination, Http};
use serenity::model::channel::Channel;
use serenity::model::id::{ChannelId, GuildId, UserId};

use crate::error::Error;

/// A guild the bot's user belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    pub id: GuildId,
    pub name: String,
}

/// A channel as seen by the bot. `guild_id` is `None` for private channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub name: String,
    pub guild_id: Option<GuildId>,
}

/// The parts of an inbound message the mention responder looks at.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub author: UserId,
    pub channel_id: ChannelId,
    pub mentions: Vec<UserId>,
}

impl From<&serenity::model::channel::Message> for IncomingMessage {
    fn from(msg: &serenity::model::channel::Message) -> Self {
        Self {
            author: msg.author.id,
            channel_id: msg.channel_id,
            mentions: msg.mentions.iter().map(|user| user.id).collect(),
        }
    }
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// One page of the current user's guilds, strictly after `after`.
    async fn current_user_guilds(
        &self,
        after: Option<GuildId>,
        limit: u8,
    ) -> Result<Vec<GuildSummary>, Error>;

    async fn guild_channels(&self, guild_id: GuildId) -> Result<Vec<ChannelSummary>, Error>;

    /// Identifier of the bot's own user.
    async fn current_user(&self) -> Result<UserId, Error>;

    async fn channel(&self, channel_id: ChannelId) -> Result<ChannelSummary, Error>;

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<(), Error>;
}

#[async_trait]
impl Gateway for Http {
    async fn current_user_guilds(
        &self,
        after: Option<GuildId>,
        limit: u8,
    ) -> Result<Vec<GuildSummary>, Error> {
        let guilds = self
            .get_guilds(after.map(GuildPagination::After), Some(u64::from(limit)))
            .await?;
        Ok(guilds
            .into_iter()
            .map(|guild| GuildSummary {
                id: guild.id,
                name: guild.name,
            })
            .collect())
    }

    async fn guild_channels(&self, guild_id: GuildId) -> Result<Vec<ChannelSummary>, Error> {
        let channels = self.get_channels(guild_id).await?;
        Ok(channels
            .into_iter()
            .map(|channel| ChannelSummary {
                id: channel.id,
                name: channel.name,
                guild_id: Some(channel.guild_id),
            })
            .collect())
    }

    async fn current_user(&self) -> Result<UserId, Error> {
        let user = self.get_current_user().await?;
        Ok(user.id)
    }

    async fn channel(&self, channel_id: ChannelId) -> Result<ChannelSummary, Error> {
        let summary = match self.get_channel(channel_id).await? {
            Channel::Guild(channel) => ChannelSummary {
                id: channel.id,
                name: channel.name,
                guild_id: Some(channel.guild_id),
            },
            Channel::Private(channel) => ChannelSummary {
                id: channel.id,
                name: channel.name(),
                guild_id: None,
            },
            other => ChannelSummary {
                id: other.id(),
                name: String::new(),
                guild_id: None,
            },
        };
        Ok(summary)
    }

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<(), Error> {
        channel_id
            .send_message(self, CreateMessage::new().content(content))
            .await?;
        Ok(())
    }
}
