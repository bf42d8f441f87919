//! Telegram notification dispatch

use homework_core::ChatTarget;
use std::future::Future;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::debug;

use crate::error::NotifyError;

/// Destination for status messages
pub trait Notifier {
    /// Deliver one plain-text message
    fn send(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Sends messages to a single chat through the Bot API
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat: &ChatTarget) -> Self {
        Self {
            bot,
            recipient: recipient(chat),
        }
    }
}

fn recipient(chat: &ChatTarget) -> Recipient {
    match chat {
        ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChatTarget::Channel(username) => Recipient::ChannelUsername(username.clone()),
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        debug!("Sending message to chat {:?}", self.recipient);

        self.bot
            .send_message(self.recipient.clone(), text)
            .await?;

        debug!("Message delivered: \"{}\"", text);
        Ok(())
    }
}
