use std::sync::atomic::{AtomicBool, Ordering};

use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::user::OnlineStatus;

use crate::config::Config;
use crate::gateway::IncomingMessage;

mod guilds;
mod mention;
mod notify;

pub struct Handler {
    config: Config,
    // `ready` fires again after every reconnect; greet only once per process.
    notified: AtomicBool,
}

impl Handler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            notified: AtomicBool::new(false),
        }
    }

    /// True for the first caller only.
    fn claim_ready_notification(&self) -> bool {
        !self.notified.swap(true, Ordering::SeqCst)
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected to Discord!", ready.user.name);
        ctx.set_presence(None, OnlineStatus::Online);

        if !self.claim_ready_notification() {
            tracing::debug!("Ready notification already sent, skipping");
            return;
        }

        if let Err(e) = notify::notify_ready(&*ctx.http, &self.config).await {
            tracing::error!(error = %e, "Error getting user guilds");
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let message = IncomingMessage::from(&msg);
        mention::respond_to_mention(&*ctx.http, &self.config, &message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_notification_is_claimed_once() {
        let config = Config::from_lookup(|_| None).unwrap();
        let handler = Handler::new(config);

        assert!(handler.claim_ready_notification());
        assert!(!handler.claim_ready_notification());
        assert!(!handler.claim_ready_notification());
    }
}
