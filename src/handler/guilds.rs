use serenity::model::id::GuildId;

use crate::error::Error;
use crate::gateway::{ChannelSummary, Gateway, GuildSummary};

pub const GUILD_PAGE_LIMIT: u8 = 100;

/// Every guild the bot's user belongs to, in the order Discord returns them.
///
/// Pages are requested with the last seen guild as the `after` cursor until a
/// page comes back short. Any failed request aborts the whole enumeration.
pub async fn find_user_guilds<G>(gateway: &G) -> Result<Vec<GuildSummary>, Error>
where
    G: Gateway + ?Sized,
{
    let mut guilds = Vec::new();
    let mut after = None;

    loop {
        let page = gateway.current_user_guilds(after, GUILD_PAGE_LIMIT).await?;
        let page_len = page.len();
        tracing::debug!(page_len, ?after, "Fetched guild page");

        if let Some(last) = page.last() {
            after = Some(last.id);
        }
        guilds.extend(page);

        if page_len < usize::from(GUILD_PAGE_LIMIT) {
            return Ok(guilds);
        }
    }
}

/// First channel in the guild named exactly `channel_name`.
pub async fn find_channel_by_name<G>(
    gateway: &G,
    guild_id: GuildId,
    channel_name: &str,
) -> Result<ChannelSummary, Error>
where
    G: Gateway + ?Sized,
{
    gateway
        .guild_channels(guild_id)
        .await?
        .into_iter()
        .find(|channel| channel.name == channel_name)
        .ok_or_else(|| Error::ChannelNotFound {
            name: channel_name.to_string(),
        })
}
