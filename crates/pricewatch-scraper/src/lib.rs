pub mod client;
pub mod error;
pub mod normalize;
pub mod source;
pub mod types;

pub use client::ListingClient;
pub use error::ScraperError;
pub use normalize::{normalize_product, normalize_products};
pub use source::ProductSource;
pub use types::{ListingPrice, ListingProduct, ListingResponse, PriceValue};
