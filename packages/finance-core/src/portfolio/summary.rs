//! Portfolio summary figures.

use serde::{Deserialize, Serialize};

use super::tracker::PortfolioStore;
use crate::types::{AssetCategory, CategoryAllocation};

/// Portfolio totals and category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    /// Total market value of all holdings
    pub total_value: f64,
    /// Total cost basis of all holdings
    pub total_cost: f64,
    /// Total unrealized gain/loss in dollars
    pub total_profit_loss: f64,
    /// Number of rows
    pub holding_count: usize,
    /// Market value per category
    pub allocations: Vec<CategoryAllocation>,
}

impl PortfolioSummary {
    /// Calculate the summary of a store.
    pub fn from_store(store: &PortfolioStore) -> Self {
        Self {
            total_value: store.total_value(),
            total_cost: store.total_cost(),
            total_profit_loss: store.total_profit_loss(),
            holding_count: store.len(),
            allocations: store.group_by_category(),
        }
    }

    /// Share of total value held in each category.
    ///
    /// Empty when the total value is not positive.
    pub fn allocation_weights(&self) -> Vec<(AssetCategory, f64)> {
        if self.total_value <= 0.0 {
            return Vec::new();
        }

        self.allocations
            .iter()
            .map(|a| (a.category, a.total_value / self.total_value))
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

    fn listing(quote_type: &str, price: f64) -> Listing {
        Listing::new(
            AssetMetadata::new().with_quote_type(quote_type),
            vec![PricePoint::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), price)],
        )
    }

    #[test]
    fn test_summary_from_store() {
        let provider = MemoryQuoteProvider::new()
            .with_listing("AAPL", listing("EQUITY", 100.0))
            .with_listing("SPY", listing("ETF", 100.0));

        let mut store = PortfolioStore::new();
        store.add(&provider, "AAPL", 30.0).unwrap();
        store.add(&provider, "SPY", 10.0).unwrap();

        let summary = PortfolioSummary::from_store(&store);
        assert_eq!(summary.total_value, 4000.0);
        assert_eq!(summary.total_cost, 4000.0);
        assert_eq!(summary.total_profit_loss, 0.0);
        assert_eq!(summary.holding_count, 2);

        let weights = summary.allocation_weights();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].0, AssetCategory::Equity);
        assert_relative_eq!(weights[0].1, 0.75, epsilon = 1e-12);
        assert_relative_eq!(weights[1].1, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_store_has_no_weights() {
        let summary = PortfolioSummary::from_store(&PortfolioStore::new());
        assert_eq!(summary.total_value, 0.0);
        assert!(summary.allocations.is_empty());
        assert!(summary.allocation_weights().is_empty());
    }
}
