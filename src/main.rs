use anyhow::{Context, Error, Result};
use dotenvy::dotenv;
use serenity::client::ClientBuilder;
use serenity::model::gateway::GatewayIntents;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod gateway;
mod handler;

use config::Config;
use handler::Handler;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(config.log_level.into()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(&config);

    if config.notify_channel_name.is_empty() {
        tracing::warn!("NOTIFY_CHANNEL_NAME is not set, no guild will be greeted on startup");
    }

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::DIRECT_MESSAGES;

    let token = config.discord_token.clone();
    let mut client = match ClientBuilder::new(token, intents)
        .event_handler(Handler::new(config))
        .await
    {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Error creating Discord client");
            return Ok(());
        }
    };

    tracing::info!("Starting Discord bot...");
    if let Err(e) = client.start().await {
        tracing::error!(error = %e, "Error opening gateway session");
    }

    Ok(())
}
