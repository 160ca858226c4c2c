//! The seam between the run and wherever product listings come from.

use async_trait::async_trait;
use pricewatch_core::ProductRecord;

use crate::error::ScraperError;

/// Something that can produce the current product listing for a category.
///
/// [`crate::ListingClient`] is the HTTP implementation. Alternate retrieval
/// strategies (a scraping proxy, a recorded fixture) plug in here without the
/// detector or the run knowing the difference.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Returns every product in `category`, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the listing cannot be retrieved or any
    /// record in it is malformed. No partial listing is ever returned.
    async fn fetch(&self, category: &str) -> Result<Vec<ProductRecord>, ScraperError>;
}
