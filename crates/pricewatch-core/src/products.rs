use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product from the category listing, validated and typed.
///
/// Built fresh on every run from the upstream response; see
/// `pricewatch_scraper::normalize` for the parse step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Upstream article code, unique per product (e.g. `"0985197001"`).
    pub code: String,
    pub name: String,
    /// Storefront path relative to the site origin, e.g. `"/pl_pl/productpage.0985197001.html"`.
    pub url: String,
    pub price: Decimal,
    /// Present only while a promotion is active.
    pub promo_price: Option<Decimal>,
}

impl ProductRecord {
    /// The state that gets persisted for this product at the end of a run.
    #[must_use]
    pub fn price_state(&self) -> PriceState {
        PriceState {
            price: self.price,
            promo: self.promo_price,
        }
    }

    /// Absolute storefront link for this product under `site_origin`.
    ///
    /// URLs that are already absolute are returned unchanged.
    #[must_use]
    pub fn absolute_url(&self, site_origin: &str) -> String {
        if self.url.starts_with("http://") || self.url.starts_with("https://") {
            return self.url.clone();
        }
        let origin = site_origin.trim_end_matches('/');
        if self.url.starts_with('/') {
            format!("{origin}{}", self.url)
        } else {
            format!("{origin}/{}", self.url)
        }
    }
}

/// Last-known prices for one product, as persisted in the history file.
///
/// Serialized with JSON numbers (`{"price": 129.99, "promo": null}`) so files
/// stay readable and compatible with snapshots written by earlier versions of
/// the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceState {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub promo: Option<Decimal>,
}
