//! Response types for the category product-listing endpoint.
//!
//! ## Observed shape
//!
//! ```json
//! {
//!   "products": [{
//!     "code": "0985197001",
//!     "name": "Slim Jeans",
//!     "url": "/pl_pl/productpage.0985197001.html",
//!     "price": { "value": 129.99, "redPrice": { "value": 89.99 } }
//!   }]
//! }
//! ```
//!
//! ### Promotional price
//! Carried as `price.redPrice` while a promotion runs and omitted otherwise.
//! Some responses place `redPrice` next to `price` instead of inside it; both
//! positions are modelled and [`crate::normalize`] prefers the nested one.
//!
//! ### Numbers
//! Prices arrive as JSON numbers, occasionally as numeric strings. They are
//! kept as raw [`serde_json::Value`]s here so a bad value becomes a
//! per-product malformed-record error instead of failing the whole body.
//!
//! Every field is optional at this layer for the same reason: the required
//! ones are checked during normalization.

use serde::Deserialize;
use serde_json::Value;

/// Top-level listing response.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub products: Vec<ListingProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingProduct {
    /// Article code. A string in every observed response.
    #[serde(default)]
    pub code: Option<Value>,

    #[serde(default)]
    pub name: Option<String>,

    /// Path relative to the storefront origin.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub price: Option<ListingPrice>,

    /// Promotional price placed beside `price` rather than inside it.
    #[serde(default)]
    pub red_price: Option<PriceValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPrice {
    #[serde(default)]
    pub value: Option<Value>,

    #[serde(default)]
    pub red_price: Option<PriceValue>,
}

#[derive(Debug, Deserialize)]
pub struct PriceValue {
    #[serde(default)]
    pub value: Option<Value>,
}
