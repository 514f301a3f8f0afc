//! Finance Core - calculations and in-memory state for a personal finance dashboard.
//!
//! This crate provides the non-UI core of the dashboard:
//!
//! - **Growth projection**: compound-interest schedule from yearly contributions
//! - **Risk estimation**: annualized volatility and 95% historical VaR
//! - **Asset classification**: Equity / Bond / Fund heuristic over provider metadata
//! - **Portfolio and watchlist stores**: ordered in-memory collections
//! - **Quote providers**: the market-data seam, with a bounded TTL metadata cache
//! - **Export**: CSV and JSON writers for every tabular record
//!
//! # Example
//!
//! ```rust
//! use finance_core::portfolio::project;
//! use finance_core::InvestmentType;
//!
//! let schedule = project(1000.0, 5.0, 10, InvestmentType::Equity).unwrap();
//! assert_eq!(schedule.len(), 10);
//! assert_eq!(schedule[0].capital, 1060.0);
//! ```

pub mod config;
pub mod export;
pub mod lookup;
pub mod portfolio;
pub mod provider;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use types::{
    normalize_symbol, ApiResponse, AssetCategory, AssetMetadata, CategoryAllocation, GrowthPoint,
    Holding, HoldingRow, InvestmentType, Period, PricePoint, PriceSeries, RiskEstimate,
    WatchlistRow,
};

// Re-export main functionality
pub use config::FinanceConfig;
pub use lookup::{lookup, TickerOverview};
pub use portfolio::{
    classify, estimate, project, PortfolioStore, PortfolioSummary, RefreshReport, WatchlistStore,
};
pub use provider::{CachedQuoteProvider, MemoryQuoteProvider, QuoteProvider};
pub use session::Session;

/// Error types for finance-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Quote unavailable for {symbol}: {reason}")]
    QuoteUnavailable { symbol: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Symbol not in watchlist: {0}")]
    SymbolNotFound(String),
}

impl Error {
    /// Shorthand for a provider miss.
    pub fn quote_unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        Self::QuoteUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for finance-core operations.
pub type Result<T> = std::result::Result<T, Error>;
