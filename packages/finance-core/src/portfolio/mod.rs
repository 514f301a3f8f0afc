//! Portfolio management module.
//!
//! Provides the holdings and watchlist stores, growth projection, risk
//! estimation, and asset classification.

mod classify;
mod growth;
mod risk;
mod summary;
mod tracker;
mod watchlist;

pub use classify::classify;
pub use growth::{final_capital, project, round_cents};
pub use risk::{
    estimate, estimate_history, percentile, sample_std_dev, simple_returns,
    TRADING_DAYS_PER_YEAR, VAR_PERCENTILE,
};
pub use summary::PortfolioSummary;
pub use tracker::{PortfolioStore, RefreshReport};
pub use watchlist::WatchlistStore;
