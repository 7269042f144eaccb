use crate::config::Config;
use crate::gateway::{Gateway, IncomingMessage};

/// Reply into the origin channel when the bot is mentioned by someone else.
///
/// Every failure is logged and ends handling of this message only.
pub async fn respond_to_mention<G>(gateway: &G, config: &Config, message: &IncomingMessage)
where
    G: Gateway + ?Sized,
{
    let bot = match gateway.current_user().await {
        Ok(bot) => bot,
        Err(e) => {
            tracing::error!(error = %e, "Error getting current user");
            return;
        }
    };

    if !message.mentions.contains(&bot) {
        return;
    }

    if message.author == bot {
        tracing::debug!(channel_id = %message.channel_id, "Ignoring own mention");
        return;
    }

    let channel = match gateway.channel(message.channel_id).await {
        Ok(channel) => channel,
        Err(e) => {
            tracing::error!(channel_id = %message.channel_id, error = %e, "Error getting channel");
            return;
        }
    };

    tracing::debug!(channel = %channel.name, guild_id = ?channel.guild_id, "Replying to mention");
    if let Err(e) = gateway.send_message(channel.id, &config.mention_reply).await {
        tracing::error!(channel_id = %channel.id, error = %e, "Error sending message");
    }
}
