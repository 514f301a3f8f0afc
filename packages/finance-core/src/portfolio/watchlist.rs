//! Watchlist of symbols with on-demand risk snapshots.

use serde::{Deserialize, Serialize};

use super::risk::estimate_history;
use crate::provider::QuoteProvider;
use crate::types::{normalize_symbol, Period, PriceSeries, WatchlistRow};
use crate::{Error, Result};

/// Ordered list of watched symbols.
///
/// Symbols are not checked against a provider when added; bad symbols show
/// up as unavailable rows in [`WatchlistStore::snapshot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchlistStore {
    symbols: Vec<String>,
}

impl WatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        let symbol_upper = symbol.trim().to_uppercase();
        self.symbols.iter().any(|s| *s == symbol_upper)
    }

    /// Append a symbol. Duplicates are kept.
    pub fn add(&mut self, symbol: &str) -> Result<String> {
        let symbol = normalize_symbol(symbol)?;
        tracing::debug!("Watching {}", symbol);
        self.symbols.push(symbol.clone());
        Ok(symbol)
    }

    /// Remove the first occurrence of a symbol.
    pub fn remove(&mut self, symbol: &str) -> Result<String> {
        let symbol_upper = normalize_symbol(symbol)?;
        let idx = self
            .symbols
            .iter()
            .position(|s| *s == symbol_upper)
            .ok_or_else(|| Error::SymbolNotFound(symbol_upper.clone()))?;

        Ok(self.symbols.remove(idx))
    }

    /// Current price and risk figures for every symbol, in list order.
    ///
    /// A symbol whose history cannot be fetched, or is empty, yields a row
    /// with every figure unavailable; the other rows are unaffected.
    pub fn snapshot<P: QuoteProvider + ?Sized>(
        &self,
        provider: &P,
        period: Period,
    ) -> Vec<WatchlistRow> {
        self.symbols
            .iter()
            .map(|symbol| match provider.history(symbol, period) {
                Ok(history) => match history.last() {
                    Some(last) => {
                        let risk = estimate_history(&history);
                        WatchlistRow {
                            symbol: symbol.clone(),
                            current_price: Some(last.close).filter(|p| p.is_finite()),
                            volatility: risk.volatility(),
                            value_at_risk: risk.value_at_risk(),
                        }
                    }
                    None => {
                        tracing::warn!("No history for {} over {}", symbol, period);
                        WatchlistRow::unavailable(symbol)
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", symbol, e);
                    WatchlistRow::unavailable(symbol)
                }
            })
            .collect()
    }

    /// Close series per symbol for charting. Symbols that fail are skipped.
    pub fn price_series<P: QuoteProvider + ?Sized>(
        &self,
        provider: &P,
        period: Period,
    ) -> Vec<PriceSeries> {
        self.symbols
            .iter()
            .filter_map(|symbol| match provider.history(symbol, period) {
                Ok(points) => Some(PriceSeries {
                    symbol: symbol.clone(),
                    points,
                }),
                Err(e) => {
                    tracing::debug!("Skipping {} in chart: {}", symbol, e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Listing, MemoryQuoteProvider};
    use crate::types::{AssetMetadata, PricePoint};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn history(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                PricePoint::new(
                    NaiveDate::from_ymd_opt(2024, 6, 1 + i as u32).unwrap(),
                    close,
                )
            })
            .collect()
    }

    fn provider() -> MemoryQuoteProvider {
        MemoryQuoteProvider::new()
            .with_listing(
                "AAPL",
                Listing::new(AssetMetadata::new(), history(&[100.0, 110.0, 99.0, 108.9])),
            )
            .with_listing("FLAT", Listing::new(AssetMetadata::new(), history(&[20.0, 20.0, 20.0])))
            .with_listing("NEW", Listing::new(AssetMetadata::new(), history(&[5.0])))
            .with_listing("EMPTY", Listing::default())
    }

    #[test]
    fn test_add_uppercases_without_validation() {
        let mut watchlist = WatchlistStore::new();
        assert_eq!(watchlist.add("doesnotexist").unwrap(), "DOESNOTEXIST");
        assert!(watchlist.contains("DoesNotExist"));
        assert!(matches!(watchlist.add(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_duplicates_and_remove_first() {
        let mut watchlist = WatchlistStore::new();
        watchlist.add("AAPL").unwrap();
        watchlist.add("MSFT").unwrap();
        watchlist.add("aapl").unwrap();

        assert_eq!(watchlist.remove("AAPL").unwrap(), "AAPL");
        assert_eq!(watchlist.symbols(), &["MSFT".to_string(), "AAPL".to_string()]);
    }

    #[test]
    fn test_remove_missing() {
        let mut watchlist = WatchlistStore::new();
        assert!(matches!(watchlist.remove("AAPL"), Err(Error::SymbolNotFound(_))));
    }

    #[test]
    fn test_snapshot_isolates_failures() {
        let provider = provider();
        let mut watchlist = WatchlistStore::new();
        for symbol in ["AAPL", "MISSING", "FLAT", "EMPTY", "NEW"] {
            watchlist.add(symbol).unwrap();
        }

        let rows = watchlist.snapshot(&provider, Period::OneYear);
        assert_eq!(rows.len(), 5);

        assert_eq!(rows[0].symbol, "AAPL");
        assert_eq!(rows[0].current_price, Some(108.9));
        assert_relative_eq!(rows[0].value_at_risk.unwrap(), -0.08, epsilon = 1e-9);
        assert!(rows[0].volatility.unwrap() > 0.0);

        assert_eq!(rows[1], WatchlistRow::unavailable("MISSING"));

        assert_eq!(rows[2].current_price, Some(20.0));
        assert_eq!(rows[2].volatility, Some(0.0));
        assert_eq!(rows[2].value_at_risk, Some(0.0));

        assert_eq!(rows[3], WatchlistRow::unavailable("EMPTY"));

        // Price known, too short for risk
        assert_eq!(rows[4].current_price, Some(5.0));
        assert_eq!(rows[4].volatility, None);
        assert_eq!(rows[4].value_at_risk, None);
    }

    #[test]
    fn test_price_series_skips_failures() {
        let provider = provider();
        let mut watchlist = WatchlistStore::new();
        watchlist.add("AAPL").unwrap();
        watchlist.add("MISSING").unwrap();
        watchlist.add("FLAT").unwrap();

        let series = watchlist.price_series(&provider, Period::OneMonth);
        let symbols: Vec<&str> = series.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "FLAT"]);
        assert_eq!(series[0].points.len(), 4);
    }
}
