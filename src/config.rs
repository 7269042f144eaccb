use tracing_subscriber::filter::LevelFilter;

use crate::error::Error;

const DEFAULT_READY_MESSAGE: &str = "Hello everyone! I'm ready.";
const DEFAULT_MENTION_REPLY: &str = "Hello, world!";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub notify_channel_name: String,
    pub ready_message: String,
    pub mention_reply: String,
    pub log_level: LevelFilter,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Passed through as-is (unset reads as empty):
    /// - `DISCORD_TOKEN`: Bot token from the Discord Developer Portal
    /// - `NOTIFY_CHANNEL_NAME`: Channel greeted in every guild on startup
    ///
    /// Optional:
    /// - `READY_MESSAGE`: Startup greeting
    /// - `MENTION_REPLY`: Reply posted when the bot is mentioned
    /// - `LOG_LEVEL`: DEBUG, INFO, WARN, ERROR, FATAL or NONE
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    ///
    /// The token and channel name are not validated: a bad token fails when
    /// the gateway session opens, an unset channel name matches no channel.
    /// Only an unknown `LOG_LEVEL` is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|val| !val.is_empty());

        let discord_token = lookup("DISCORD_TOKEN").unwrap_or_default();
        let notify_channel_name = lookup("NOTIFY_CHANNEL_NAME").unwrap_or_default();
        let ready_message = var("READY_MESSAGE").unwrap_or_else(|| DEFAULT_READY_MESSAGE.into());
        let mention_reply = var("MENTION_REPLY").unwrap_or_else(|| DEFAULT_MENTION_REPLY.into());

        let log_level = match var("LOG_LEVEL") {
            Some(val) => parse_log_level(&val)?,
            None => LevelFilter::INFO,
        };

        Ok(Self {
            discord_token,
            notify_channel_name,
            ready_message,
            mention_reply,
            log_level,
        })
    }
}

fn parse_log_level(val: &str) -> Result<LevelFilter, Error> {
    match val.trim().to_ascii_uppercase().as_str() {
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARN" => Ok(LevelFilter::WARN),
        "ERROR" | "FATAL" => Ok(LevelFilter::ERROR),
        "NONE" => Ok(LevelFilter::OFF),
        _ => Err(Error::Config(format!("Invalid LOG_LEVEL: '{val}'"))),
    }
}
