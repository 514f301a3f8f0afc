//! Dashboard session owning the stores and the cached provider.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::FinanceConfig;
use crate::lookup::{lookup, TickerOverview};
use crate::portfolio::{PortfolioStore, PortfolioSummary, RefreshReport, WatchlistStore};
use crate::provider::{CachedQuoteProvider, QuoteProvider};
use crate::types::{Holding, PriceSeries, WatchlistRow};
use crate::Result;

/// State of one dashboard user, created and closed by the host application.
///
/// Holds a portfolio, a watchlist, and the quote provider wrapped in a
/// lookup cache. Nothing outlives [`Session::close`].
#[derive(Debug)]
pub struct Session<P: QuoteProvider> {
    id: Uuid,
    created_at: DateTime<Utc>,
    config: FinanceConfig,
    provider: CachedQuoteProvider<P>,
    portfolio: PortfolioStore,
    watchlist: WatchlistStore,
}

impl<P: QuoteProvider> Session<P> {
    /// Open a session over `provider`.
    pub fn new(provider: P, config: &FinanceConfig) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config: config.clone(),
            provider: CachedQuoteProvider::from_config(provider, &config.cache),
            portfolio: PortfolioStore::new(),
            watchlist: WatchlistStore::new(),
        };
        tracing::info!("Session {} opened", session.id);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn config(&self) -> &FinanceConfig {
        &self.config
    }

    pub fn provider(&self) -> &CachedQuoteProvider<P> {
        &self.provider
    }

    pub fn portfolio(&self) -> &PortfolioStore {
        &self.portfolio
    }

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }

    pub fn add_holding(&mut self, symbol: &str, quantity: f64) -> Result<Holding> {
        self.portfolio.add(&self.provider, symbol, quantity)
    }

    pub fn refresh_portfolio(&mut self) -> RefreshReport {
        self.portfolio.refresh_all(&self.provider)
    }

    pub fn update_holding(
        &mut self,
        symbol: &str,
        quantity: f64,
        purchase_price: f64,
    ) -> Result<Holding> {
        self.portfolio.update(symbol, quantity, purchase_price)
    }

    pub fn remove_holding(&mut self, symbol: &str) -> Result<Vec<Holding>> {
        self.portfolio.remove(symbol)
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_store(&self.portfolio)
    }

    pub fn add_to_watchlist(&mut self, symbol: &str) -> Result<String> {
        self.watchlist.add(symbol)
    }

    pub fn remove_from_watchlist(&mut self, symbol: &str) -> Result<String> {
        self.watchlist.remove(symbol)
    }

    /// Watchlist rows over the configured period.
    pub fn watchlist_snapshot(&self) -> Vec<WatchlistRow> {
        self.watchlist
            .snapshot(&self.provider, self.config.watchlist_period)
    }

    /// Watchlist chart series over the configured period.
    pub fn watchlist_series(&self) -> Vec<PriceSeries> {
        self.watchlist
            .price_series(&self.provider, self.config.watchlist_period)
    }

    /// Ticker overview with history over the configured period.
    pub fn lookup(&self, symbol: &str) -> Result<TickerOverview> {
        lookup(&self.provider, symbol, self.config.lookup_period)
    }

    /// Tear the session down, handing back its stores.
    pub fn close(self) -> (PortfolioStore, WatchlistStore) {
        tracing::info!(
            "Session {} closed ({} holdings, {} watched)",
            self.id,
            self.portfolio.len(),
            self.watchlist.len()
        );
        (self.portfolio, self.watchlist)
    }
}
