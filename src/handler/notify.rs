use super::guilds::{find_channel_by_name, find_user_guilds};
use crate::config::Config;
use crate::error::Error;
use crate::gateway::Gateway;

/// Post the ready greeting into the notify channel of every guild.
///
/// Guilds without a matching channel and failed sends are logged and skipped.
/// Only a failure to list the guilds is returned. Returns how many greetings
/// were delivered.
pub async fn notify_ready<G>(gateway: &G, config: &Config) -> Result<usize, Error>
where
    G: Gateway + ?Sized,
{
    let guilds = find_user_guilds(gateway).await?;
    let mut delivered = 0;

    for guild in &guilds {
        tracing::debug!(guild = %guild.name, guild_id = %guild.id, "Notifying guild");

        let channel =
            match find_channel_by_name(gateway, guild.id, &config.notify_channel_name).await {
                Ok(channel) => channel,
                Err(e) => {
                    tracing::warn!(guild = %guild.name, error = %e, "Error getting notify channel");
                    continue;
                }
            };

        match gateway.send_message(channel.id, &config.ready_message).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::error!(guild = %guild.name, channel_id = %channel.id, error = %e, "Error sending message");
            }
        }
    }

    tracing::info!(guilds = guilds.len(), delivered, "Ready notification finished");
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fake::{channel, guild, FakeGateway};
    use serenity::model::id::ChannelId;

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "DISCORD_TOKEN" => Some("token".into()),
            "NOTIFY_CHANNEL_NAME" => Some("bot-status".into()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn skips_guilds_without_notify_channel() {
        let gateway = FakeGateway {
            guilds: vec![guild(1, "first"), guild(2, "second")],
            ..FakeGateway::default()
        }
        .with_channels(1, vec![channel(10, 1, "general")])
        .with_channels(2, vec![channel(20, 2, "general"), channel(21, 2, "bot-status")]);

        let delivered = notify_ready(&gateway, &config()).await.unwrap();

        assert_eq!(delivered, 1);
        assert_eq!(
            gateway.sent(),
            vec![(ChannelId::new(21), "Hello everyone! I'm ready.".to_string())]
        );
    }

    #[tokio::test]
    async fn channel_list_failure_skips_only_that_guild() {
        let gateway = FakeGateway {
            guilds: vec![guild(1, "first"), guild(2, "second")],
            ..FakeGateway::default()
        }
        .with_channels(2, vec![channel(21, 2, "bot-status")]);

        let delivered = notify_ready(&gateway, &config()).await.unwrap();

        assert_eq!(delivered, 1);
        assert_eq!(gateway.sent()[0].0, ChannelId::new(21));
    }

    #[tokio::test]
    async fn send_failure_does_not_stop_later_guilds() {
        let mut gateway = FakeGateway {
            guilds: vec![guild(1, "first"), guild(2, "second")],
            ..FakeGateway::default()
        }
        .with_channels(1, vec![channel(11, 1, "bot-status")])
        .with_channels(2, vec![channel(21, 2, "bot-status")]);
        gateway.failing_sends.insert(ChannelId::new(11));

        let delivered = notify_ready(&gateway, &config()).await.unwrap();

        assert_eq!(delivered, 1);
        assert_eq!(gateway.sent().len(), 1);
        assert_eq!(gateway.sent()[0].0, ChannelId::new(21));
    }

    #[tokio::test]
    async fn unset_channel_name_greets_no_guild() {
        let config = Config::from_lookup(|key| (key == "DISCORD_TOKEN").then(|| "token".into()))
            .unwrap();
        let gateway = FakeGateway {
            guilds: vec![guild(1, "first"), guild(2, "second")],
            ..FakeGateway::default()
        }
        .with_channels(1, vec![channel(10, 1, "general")])
        .with_channels(2, vec![channel(20, 2, "general")]);

        let delivered = notify_ready(&gateway, &config).await.unwrap();

        assert_eq!(delivered, 0);
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn guild_listing_failure_is_returned() {
        let gateway = FakeGateway {
            guilds: vec![guild(1, "first")],
            failing_guild_page: Some(0),
            ..FakeGateway::default()
        };

        let result = notify_ready(&gateway, &config()).await;

        assert!(result.is_err());
        assert!(gateway.sent().is_empty());
    }
}
