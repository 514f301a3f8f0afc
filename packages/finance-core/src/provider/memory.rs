//! In-memory quote provider backed by fixed listings.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::QuoteProvider;
use crate::types::{AssetMetadata, Period, PricePoint};
use crate::{Error, Result};

/// Everything the provider knows about one symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub metadata: AssetMetadata,
    /// Close prices, oldest first
    pub history: Vec<PricePoint>,
}

impl Listing {
    pub fn new(metadata: AssetMetadata, history: Vec<PricePoint>) -> Self {
        Self { metadata, history }
    }
}

/// Quote provider serving listings held in memory.
///
/// Useful for offline hosts and tests. Listings can be replaced or removed
/// through a shared reference, so a provider behind an `Arc` can simulate
/// symbols appearing, moving, or going dark between calls.
#[derive(Debug, Default)]
pub struct MemoryQuoteProvider {
    listings: RwLock<HashMap<String, Listing>>,
}

impl MemoryQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_listing(self, symbol: &str, listing: Listing) -> Self {
        self.insert(symbol, listing);
        self
    }

    /// Insert or replace a listing.
    pub fn insert(&self, symbol: &str, listing: Listing) {
        self.listings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_uppercase(), listing);
    }

    /// Remove a listing, returning it if present.
    pub fn remove(&self, symbol: &str) -> Option<Listing> {
        self.listings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&symbol.to_uppercase())
    }

    /// Append a close price to a listing's history.
    pub fn push_price(&self, symbol: &str, date: NaiveDate, close: f64) -> Result<()> {
        let mut listings = self.listings.write().unwrap_or_else(PoisonError::into_inner);
        let listing = listings
            .get_mut(&symbol.to_uppercase())
            .ok_or_else(|| Error::quote_unavailable(symbol, "unknown symbol"))?;
        listing.history.push(PricePoint::new(date, close));
        Ok(())
    }

    fn with_listing_ref<T>(&self, symbol: &str, f: impl FnOnce(&Listing) -> Result<T>) -> Result<T> {
        let listings = self.listings.read().unwrap_or_else(PoisonError::into_inner);
        let listing = listings
            .get(&symbol.to_uppercase())
            .ok_or_else(|| Error::quote_unavailable(symbol, "unknown symbol"))?;
        f(listing)
    }
}

/// First date included in a `period` window ending at `last`.
fn window_start(last: NaiveDate, period: Period) -> Option<NaiveDate> {
    let months = match period {
        Period::OneDay => return Some(last),
        Period::OneMonth => 1,
        Period::SixMonths => 6,
        Period::OneYear => 12,
        Period::FiveYears => 60,
    };
    last.checked_sub_months(Months::new(months))
        .map(|start| start + Days::new(1))
}

impl QuoteProvider for MemoryQuoteProvider {
    fn latest_price(&self, symbol: &str) -> Result<f64> {
        self.with_listing_ref(symbol, |listing| {
            listing
                .history
                .last()
                .map(|p| p.close)
                .ok_or_else(|| Error::quote_unavailable(symbol, "no price history"))
        })
    }

    fn history(&self, symbol: &str, period: Period) -> Result<Vec<PricePoint>> {
        self.with_listing_ref(symbol, |listing| {
            let last = match listing.history.last() {
                Some(p) => p.date,
                None => return Ok(Vec::new()),
            };
            let points = match window_start(last, period) {
                Some(start) => listing
                    .history
                    .iter()
                    .filter(|p| p.date >= start)
                    .copied()
                    .collect(),
                None => listing.history.clone(),
            };
            Ok(points)
        })
    }

    fn metadata(&self, symbol: &str) -> Result<AssetMetadata> {
        self.with_listing_ref(symbol, |listing| Ok(listing.metadata.clone()))
    }
}
