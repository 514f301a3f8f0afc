//! Metadata lookup cache in front of a quote provider, backed by moka.

use std::fmt;
use std::time::Duration;

use moka::sync::Cache;

use super::QuoteProvider;
use crate::config::CacheConfig;
use crate::types::{AssetMetadata, Period, PricePoint};
use crate::Result;

/// Quote provider that memoizes symbol metadata.
///
/// Prices and histories always reach the inner provider, so every refresh
/// and watchlist view sees live data. Only successful lookups are cached.
/// A capacity of zero disables caching.
pub struct CachedQuoteProvider<P> {
    inner: P,
    metadata: Option<Cache<String, AssetMetadata>>,
}

impl<P: QuoteProvider> CachedQuoteProvider<P> {
    /// Wrap `inner` with a cache holding up to `capacity` symbols.
    pub fn new(inner: P, capacity: usize, ttl: Option<Duration>) -> Self {
        let metadata = (capacity > 0).then(|| {
            let builder = Cache::builder().max_capacity(capacity as u64);
            match ttl {
                Some(ttl) => builder.time_to_live(ttl).build(),
                None => builder.build(),
            }
        });

        Self { inner, metadata }
    }

    pub fn from_config(inner: P, config: &CacheConfig) -> Self {
        Self::new(inner, config.capacity, config.ttl())
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    /// Number of cached symbols, after pending evictions are applied.
    pub fn cached_entries(&self) -> u64 {
        match &self.metadata {
            Some(cache) => {
                cache.run_pending_tasks();
                cache.entry_count()
            }
            None => 0,
        }
    }

    /// Drop the cached lookup for `symbol`.
    pub fn invalidate(&self, symbol: &str) {
        if let Some(cache) = &self.metadata {
            cache.invalidate(&symbol.to_uppercase());
        }
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.metadata {
            cache.invalidate_all();
        }
    }
}

impl<P> fmt::Debug for CachedQuoteProvider<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedQuoteProvider")
            .field("enabled", &self.metadata.is_some())
            .field(
                "entries",
                &self.metadata.as_ref().map_or(0, |cache| cache.entry_count()),
            )
            .finish()
    }
}

impl<P: QuoteProvider> QuoteProvider for CachedQuoteProvider<P> {
    fn latest_price(&self, symbol: &str) -> Result<f64> {
        self.inner.latest_price(symbol)
    }

    fn history(&self, symbol: &str, period: Period) -> Result<Vec<PricePoint>> {
        self.inner.history(symbol, period)
    }

    fn metadata(&self, symbol: &str) -> Result<AssetMetadata> {
        let cache = match &self.metadata {
            Some(cache) => cache,
            None => return self.inner.metadata(symbol),
        };

        let key = symbol.to_uppercase();
        if let Some(metadata) = cache.get(&key) {
            tracing::trace!("Metadata cache hit: {}", symbol);
            return Ok(metadata);
        }

        tracing::debug!("Metadata cache miss: {}", symbol);
        let metadata = self.inner.metadata(symbol)?;
        cache.insert(key, metadata.clone());
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Listing, MemoryQuoteProvider};
    use crate::Error;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Counts calls reaching the wrapped provider.
    #[derive(Default)]
    struct CountingProvider {
        inner: MemoryQuoteProvider,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl QuoteProvider for CountingProvider {
        fn latest_price(&self, symbol: &str) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.latest_price(symbol)
        }

        fn history(&self, symbol: &str, period: Period) -> Result<Vec<PricePoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.history(symbol, period)
        }

        fn metadata(&self, symbol: &str) -> Result<AssetMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.metadata(symbol)
        }
    }

    fn counting() -> CountingProvider {
        let provider = CountingProvider::default();
        for symbol in ["AAPL", "MSFT", "VTI"] {
            provider.inner.insert(
                symbol,
                Listing::new(
                    AssetMetadata::new().with_long_name(symbol),
                    vec![PricePoint::new(
                        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                        100.0,
                    )],
                ),
            );
        }
        provider
    }

    #[test]
    fn test_metadata_served_from_cache() {
        let cached = CachedQuoteProvider::new(counting(), 8, None);

        cached.metadata("AAPL").unwrap();
        cached.metadata("aapl").unwrap();
        assert_eq!(cached.inner().calls(), 1);
        assert_eq!(cached.cached_entries(), 1);
    }

    #[test]
    fn test_prices_and_history_not_cached() {
        let cached = CachedQuoteProvider::new(counting(), 8, None);

        cached.latest_price("AAPL").unwrap();
        cached.latest_price("AAPL").unwrap();
        cached.history("AAPL", Period::OneYear).unwrap();
        cached.history("AAPL", Period::OneYear).unwrap();
        assert_eq!(cached.inner().calls(), 4);
    }

    #[test]
    fn test_ttl_expiry_refetches() {
        let cached = CachedQuoteProvider::new(counting(), 8, Some(Duration::from_millis(50)));

        cached.metadata("AAPL").unwrap();
        cached.metadata("AAPL").unwrap();
        assert_eq!(cached.inner().calls(), 1);

        thread::sleep(Duration::from_millis(150));

        cached.metadata("AAPL").unwrap();
        assert_eq!(cached.inner().calls(), 2);
        cached.metadata("AAPL").unwrap();
        assert_eq!(cached.inner().calls(), 2);
    }

    #[test]
    fn test_failures_not_cached() {
        let cached = CachedQuoteProvider::new(counting(), 8, None);

        assert!(matches!(
            cached.metadata("NOPE"),
            Err(Error::QuoteUnavailable { .. })
        ));
        assert!(cached.metadata("NOPE").is_err());
        assert_eq!(cached.inner().calls(), 2);
    }

    #[test]
    fn test_invalidate_symbol() {
        let cached = CachedQuoteProvider::new(counting(), 8, None);

        cached.metadata("AAPL").unwrap();
        cached.metadata("MSFT").unwrap();
        cached.invalidate("aapl");

        cached.metadata("AAPL").unwrap();
        cached.metadata("MSFT").unwrap();
        assert_eq!(cached.inner().calls(), 3);
    }

    #[test]
    fn test_clear_drops_every_entry() {
        let cached = CachedQuoteProvider::new(counting(), 8, None);

        for symbol in ["AAPL", "MSFT", "VTI"] {
            cached.metadata(symbol).unwrap();
        }
        cached.clear();
        assert_eq!(cached.cached_entries(), 0);

        for symbol in ["AAPL", "MSFT", "VTI"] {
            cached.metadata(symbol).unwrap();
        }
        assert_eq!(cached.inner().calls(), 6);
    }

    #[test]
    fn test_capacity_bounds_entries() {
        let cached = CachedQuoteProvider::new(counting(), 2, None);

        for symbol in ["AAPL", "MSFT", "VTI"] {
            cached.metadata(symbol).unwrap();
        }
        assert!(cached.cached_entries() <= 2);
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cached = CachedQuoteProvider::new(counting(), 0, None);

        cached.metadata("AAPL").unwrap();
        cached.metadata("AAPL").unwrap();
        assert_eq!(cached.inner().calls(), 2);
        assert_eq!(cached.cached_entries(), 0);
    }
}
