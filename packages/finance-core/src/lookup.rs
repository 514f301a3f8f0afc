//! Ticker information lookup.

use serde::{Deserialize, Serialize};

use crate::portfolio::{classify, estimate_history};
use crate::provider::QuoteProvider;
use crate::types::{normalize_symbol, AssetCategory, AssetMetadata, Period, PricePoint, RiskEstimate};
use crate::Result;

/// Everything shown for a single ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickerOverview {
    pub symbol: String,
    pub metadata: AssetMetadata,
    pub category: AssetCategory,
    /// Risk over the last year of closes
    pub risk: RiskEstimate,
    /// Window of `history`
    pub period: Period,
    /// Close prices over `period`; empty if unavailable
    pub history: Vec<PricePoint>,
}

/// Look up metadata, one-year risk, and a price history for `symbol`.
///
/// Fails only when the metadata is unavailable. A missing history degrades
/// to an unavailable risk estimate and an empty series.
pub fn lookup<P: QuoteProvider + ?Sized>(
    provider: &P,
    symbol: &str,
    period: Period,
) -> Result<TickerOverview> {
    let symbol = normalize_symbol(symbol)?;
    let metadata = provider.metadata(&symbol)?;

    let risk = match provider.history(&symbol, Period::OneYear) {
        Ok(year) => estimate_history(&year),
        Err(e) => {
            tracing::warn!("No one-year history for {}: {}", symbol, e);
            RiskEstimate::Unavailable
        }
    };

    let history = provider.history(&symbol, period).unwrap_or_else(|e| {
        tracing::warn!("No {} history for {}: {}", period, symbol, e);
        Vec::new()
    });

    Ok(TickerOverview {
        category: classify(&metadata),
        symbol,
        metadata,
        risk,
        period,
        history,
    })
}
