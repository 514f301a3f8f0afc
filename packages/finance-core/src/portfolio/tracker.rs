//! Portfolio holdings management.

use serde::{Deserialize, Serialize};

use super::classify::classify;
use crate::provider::QuoteProvider;
use crate::types::{
    normalize_symbol, AssetCategory, AssetMetadata, CategoryAllocation, Holding, HoldingRow,
};
use crate::{Error, Result};

/// Ordered, in-memory collection of holdings.
///
/// Rows keep insertion order. The same symbol may appear in several rows:
/// `add` appends, `update` edits the first match, `remove` drops every match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioStore {
    holdings: Vec<Holding>,
}

/// Outcome of a price refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RefreshReport {
    /// Symbols whose current price was updated
    pub updated: Vec<String>,
    /// Symbols left untouched, with the provider's reason
    pub failed: Vec<(String, String)>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

fn validate_amount(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

impl PortfolioStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all holdings in insertion order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Symbols of every row, duplicates included.
    pub fn symbols(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.symbol.clone()).collect()
    }

    /// Find the first holding for a symbol.
    pub fn find(&self, symbol: &str) -> Option<&Holding> {
        let symbol_upper = symbol.trim().to_uppercase();
        self.holdings.iter().find(|h| h.symbol == symbol_upper)
    }

    /// Buy `quantity` units of `symbol` at the current market price.
    ///
    /// The price comes from `provider`; without it nothing is added and
    /// `QuoteUnavailable` is returned. Missing metadata only affects the
    /// category, which then defaults to `Equity`.
    pub fn add<P: QuoteProvider + ?Sized>(
        &mut self,
        provider: &P,
        symbol: &str,
        quantity: f64,
    ) -> Result<Holding> {
        let symbol = normalize_symbol(symbol)?;
        validate_amount("quantity", quantity)?;

        let price = provider.latest_price(&symbol)?;
        validate_amount("price", price)
            .map_err(|_| Error::quote_unavailable(&symbol, format!("invalid price {}", price)))?;

        let metadata = provider.metadata(&symbol).unwrap_or_else(|e| {
            tracing::debug!("No metadata for {}: {}", symbol, e);
            AssetMetadata::default()
        });

        let holding = Holding::new(&symbol, classify(&metadata), quantity, price);
        tracing::debug!(
            "Added {} x{} at {} ({})",
            holding.symbol,
            holding.quantity,
            holding.purchase_price,
            holding.category
        );
        self.holdings.push(holding.clone());
        Ok(holding)
    }

    /// Refresh the current price of every holding.
    ///
    /// Each row is fetched on its own; a failing symbol keeps its previous
    /// price and is listed in the report.
    pub fn refresh_all<P: QuoteProvider + ?Sized>(&mut self, provider: &P) -> RefreshReport {
        let mut report = RefreshReport::default();

        for holding in &mut self.holdings {
            let price = provider.latest_price(&holding.symbol).and_then(|price| {
                validate_amount("price", price).map(|_| price).map_err(|_| {
                    Error::quote_unavailable(&holding.symbol, format!("invalid price {}", price))
                })
            });

            match price {
                Ok(price) => {
                    holding.current_price = price;
                    report.updated.push(holding.symbol.clone());
                }
                Err(e) => {
                    tracing::warn!("Failed to refresh {}: {}", holding.symbol, e);
                    report.failed.push((holding.symbol.clone(), e.to_string()));
                }
            }
        }

        report
    }

    /// Overwrite quantity and purchase price of the first row for `symbol`.
    ///
    /// Returns `HoldingNotFound` when no row matches.
    pub fn update(&mut self, symbol: &str, quantity: f64, purchase_price: f64) -> Result<Holding> {
        validate_amount("quantity", quantity)?;
        validate_amount("purchase price", purchase_price)?;
        let symbol_upper = normalize_symbol(symbol)?;

        let holding = self
            .holdings
            .iter_mut()
            .find(|h| h.symbol == symbol_upper)
            .ok_or_else(|| Error::HoldingNotFound(symbol_upper.clone()))?;

        holding.quantity = quantity;
        holding.purchase_price = purchase_price;
        tracing::debug!("Updated {}: x{} at {}", symbol_upper, quantity, purchase_price);
        Ok(holding.clone())
    }

    /// Remove every row for `symbol`.
    ///
    /// Returns the removed holdings in their former order.
    pub fn remove(&mut self, symbol: &str) -> Result<Vec<Holding>> {
        let symbol_upper = normalize_symbol(symbol)?;

        let (removed, kept): (Vec<Holding>, Vec<Holding>) = self
            .holdings
            .drain(..)
            .partition(|h| h.symbol == symbol_upper);
        self.holdings = kept;

        if removed.is_empty() {
            return Err(Error::HoldingNotFound(symbol_upper));
        }

        tracing::debug!("Removed {} row(s) of {}", removed.len(), symbol_upper);
        Ok(removed)
    }

    /// Clear all holdings.
    pub fn clear(&mut self) {
        self.holdings.clear();
    }

    /// Total market value of all holdings.
    pub fn total_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.total_value()).sum()
    }

    /// Total cost basis of all holdings.
    pub fn total_cost(&self) -> f64 {
        self.holdings.iter().map(|h| h.total_cost()).sum()
    }

    /// Total unrealized gain/loss.
    pub fn total_profit_loss(&self) -> f64 {
        self.holdings.iter().map(|h| h.profit_loss()).sum()
    }

    /// Market value per category, in `Equity`, `Bond`, `Fund` order.
    ///
    /// Categories without holdings are omitted.
    pub fn group_by_category(&self) -> Vec<CategoryAllocation> {
        AssetCategory::ALL
            .iter()
            .filter_map(|&category| {
                let mut rows = self.holdings.iter().filter(|h| h.category == category).peekable();
                rows.peek()?;
                Some(CategoryAllocation {
                    category,
                    total_value: rows.map(|h| h.total_value()).sum(),
                })
            })
            .collect()
    }

    /// Tabular view with derived values.
    pub fn rows(&self) -> Vec<HoldingRow> {
        self.holdings.iter().map(|h| h.to_row()).collect()
    }
}
