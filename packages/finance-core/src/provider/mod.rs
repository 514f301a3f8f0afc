//! Market data provider seam.
//!
//! The core never talks to a market-data API directly. Hosts implement
//! [`QuoteProvider`] for their data source; [`CachedQuoteProvider`] adds a
//! bounded metadata cache and [`MemoryQuoteProvider`] serves fixed listings.

mod cache;
mod memory;

pub use cache::CachedQuoteProvider;
pub use memory::{Listing, MemoryQuoteProvider};

use std::sync::Arc;

use crate::types::{AssetMetadata, Period, PricePoint};
use crate::Result;

/// Source of prices, histories, and metadata for ticker symbols.
///
/// Symbols are passed already normalized (uppercase). Implementations
/// report missing data as `Error::QuoteUnavailable`.
pub trait QuoteProvider {
    /// Latest close price.
    fn latest_price(&self, symbol: &str) -> Result<f64>;

    /// Close prices for `period`, oldest first.
    fn history(&self, symbol: &str, period: Period) -> Result<Vec<PricePoint>>;

    /// Descriptive metadata.
    fn metadata(&self, symbol: &str) -> Result<AssetMetadata>;
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for &P {
    fn latest_price(&self, symbol: &str) -> Result<f64> {
        (**self).latest_price(symbol)
    }

    fn history(&self, symbol: &str, period: Period) -> Result<Vec<PricePoint>> {
        (**self).history(symbol, period)
    }

    fn metadata(&self, symbol: &str) -> Result<AssetMetadata> {
        (**self).metadata(symbol)
    }
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for Box<P> {
    fn latest_price(&self, symbol: &str) -> Result<f64> {
        (**self).latest_price(symbol)
    }

    fn history(&self, symbol: &str, period: Period) -> Result<Vec<PricePoint>> {
        (**self).history(symbol, period)
    }

    fn metadata(&self, symbol: &str) -> Result<AssetMetadata> {
        (**self).metadata(symbol)
    }
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for Arc<P> {
    fn latest_price(&self, symbol: &str) -> Result<f64> {
        (**self).latest_price(symbol)
    }

    fn history(&self, symbol: &str, period: Period) -> Result<Vec<PricePoint>> {
        (**self).history(symbol, period)
    }

    fn metadata(&self, symbol: &str) -> Result<AssetMetadata> {
        (**self).metadata(symbol)
    }
}
