//! HTTP client for the Telegram Bot API `sendMessage` method.
//!
//! Wraps `reqwest` with Bot API error handling. Every response is read as the
//! `{"ok": ..., "description": ...}` envelope and `"ok": false` surfaces as
//! [`TelegramError::Api`], whatever the HTTP status.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::TelegramError;
use crate::types::{ApiResponse, SendMessageRequest};

/// Client bound to one bot token and one target chat.
///
/// The Bot API base URL is configurable so tests can point the client at a
/// mock server.
pub struct TelegramClient {
    client: Client,
    token: String,
    chat_id: String,
    base_url: Url,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("token", &"[redacted]")
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Creates a client that talks to the Bot API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TelegramError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        token: &str,
        chat_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pricewatch/0.1 (price-alerts)")
            .build()?;

        // Exactly one trailing slash; method URLs are appended to it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TelegramError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
            base_url,
        })
    }

    /// Sends `text` as a single message to the configured chat.
    ///
    /// The caller is responsible for keeping `text` within
    /// [`crate::MAX_MESSAGE_CHARS`]; see [`crate::Notifier::notify`] for the
    /// splitting variant.
    ///
    /// # Errors
    ///
    /// - [`TelegramError::Api`] if the Bot API answers `"ok": false`.
    /// - [`TelegramError::UnexpectedStatus`] on a non-2xx status without an envelope.
    /// - [`TelegramError::Http`] on network failure.
    /// - [`TelegramError::Deserialize`] if a 2xx body is not an envelope.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = self.method_url("sendMessage")?;
        let payload = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        let envelope = match serde_json::from_str::<ApiResponse>(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(TelegramError::UnexpectedStatus {
                    status: status.as_u16(),
                })
            }
            Err(e) => {
                return Err(TelegramError::Deserialize {
                    context: "sendMessage response".to_string(),
                    source: e,
                })
            }
        };

        if !envelope.ok {
            return Err(TelegramError::Api {
                error_code: envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                description: envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        tracing::debug!(chars = text.chars().count(), "telegram message sent");
        Ok(())
    }

    /// Builds `{base}/bot{token}/{method}`.
    ///
    /// Formatted as a whole string rather than joined: tokens look like
    /// `123456:ABC`, which `Url::join` would read as a URL scheme.
    fn method_url(&self, method: &str) -> Result<Url, TelegramError> {
        Url::parse(&format!("{}bot{}/{method}", self.base_url, self.token))
            .map_err(|e| TelegramError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}
