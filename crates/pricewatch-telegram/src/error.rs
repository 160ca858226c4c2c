use thiserror::Error;

/// Errors returned by the Telegram Bot API client.
///
/// HTTP errors are stripped of their URL before being wrapped, because the
/// bot token is part of every request path.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered with `"ok": false`.
    #[error("Telegram API error {error_code}: {description}")]
    Api { error_code: i64, description: String },

    /// Non-2xx response whose body is not a Bot API envelope.
    #[error("unexpected HTTP status {status} from Telegram")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Telegram API base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
