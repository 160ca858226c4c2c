//! HTTP client for the category product-listing endpoint.

use std::time::Duration;

use async_trait::async_trait;
use pricewatch_core::{AppConfig, ProductRecord};
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::normalize::normalize_products;
use crate::source::ProductSource;
use crate::types::ListingResponse;

/// How much of the response body goes into the debug log.
const BODY_LOG_PREFIX_CHARS: usize = 300;

/// HTTP client for the listing endpoint.
///
/// The upstream rejects requests that do not look like they come from its own
/// storefront, so every request carries browser-like `Accept`,
/// `Accept-Language`, `Referer` and `Origin` headers alongside the configured
/// `User-Agent`.
///
/// A single attempt is made per fetch; the run is retried by the next
/// scheduled invocation.
pub struct ListingClient {
    client: Client,
    api_base: String,
    site_origin: String,
    accept_language: String,
}

impl ListingClient {
    /// Creates a `ListingClient` with configured timeout and headers.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_base: &str,
        site_origin: &str,
        timeout_secs: u64,
        user_agent: &str,
        accept_language: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_owned(),
            site_origin: site_origin.trim_end_matches('/').to_owned(),
            accept_language: accept_language.to_owned(),
        })
    }

    /// Builds a client from the run configuration.
    ///
    /// # Errors
    ///
    /// See [`ListingClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.api_base,
            &config.site_origin,
            config.request_timeout_secs,
            &config.user_agent,
            &config.accept_language,
        )
    }

    /// Fetches the raw listing for `category`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] — the base and category do not form a URL.
    /// - [`ScraperError::NotFound`] — HTTP 404, usually an unknown category.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::Deserialize`] — body is not JSON or lacks `products`.
    pub async fn fetch_listing(&self, category: &str) -> Result<ListingResponse, ScraperError> {
        let url = self.listing_url(category)?;

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
            .header(reqwest::header::REFERER, format!("{}/", self.site_origin))
            .header(reqwest::header::ORIGIN, &self.site_origin)
            .send()
            .await?;
        let status = response.status();
        let url = url.to_string();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound { url });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        tracing::debug!(
            status = status.as_u16(),
            body = %body.chars().take(BODY_LOG_PREFIX_CHARS).collect::<String>(),
            "listing response"
        );

        serde_json::from_str::<ListingResponse>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("listing for category {category}"),
            source: e,
        })
    }

    /// Builds `{api_base}/{category}.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the result does not parse.
    fn listing_url(&self, category: &str) -> Result<Url, ScraperError> {
        let raw = format!("{}/{category}.json", self.api_base);
        Url::parse(&raw).map_err(|e| ScraperError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ProductSource for ListingClient {
    async fn fetch(&self, category: &str) -> Result<Vec<ProductRecord>, ScraperError> {
        let listing = self.fetch_listing(category).await?;
        let products = normalize_products(listing.products)?;
        tracing::info!(category, products = products.len(), "fetched product listing");
        Ok(products)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
