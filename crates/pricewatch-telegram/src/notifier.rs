use async_trait::async_trait;

use crate::chunk::{split_message, MAX_MESSAGE_CHARS};
use crate::client::TelegramClient;
use crate::error::TelegramError;

/// Delivers an assembled notification body somewhere a person will read it.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `text`. Delivery is best-effort and never retried.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] describing the first delivery failure.
    async fn notify(&self, text: &str) -> Result<(), TelegramError>;
}

#[async_trait]
impl Notifier for TelegramClient {
    /// Sends `text` as one or more messages, split on blank lines to stay
    /// under the Bot API length cap. Stops at the first failed message.
    async fn notify(&self, text: &str) -> Result<(), TelegramError> {
        let messages = split_message(text, MAX_MESSAGE_CHARS);
        let total = messages.len();
        for (idx, message) in messages.iter().enumerate() {
            self.send_message(message).await?;
            tracing::debug!(part = idx + 1, total, "notification part delivered");
        }
        Ok(())
    }
}
