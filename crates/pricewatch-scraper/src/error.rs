use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed product {code}: {reason}")]
    MalformedProduct { code: String, reason: String },

    #[error("invalid listing URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ScraperError {
    /// `true` when the listing was fetched but a record broke the expected
    /// shape, as opposed to the fetch itself failing.
    #[must_use]
    pub fn is_malformed_product(&self) -> bool {
        matches!(self, ScraperError::MalformedProduct { .. })
    }
}
