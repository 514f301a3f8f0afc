//! Core data types for the finance dashboard.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Normalize a user-entered symbol: trimmed and uppercase.
///
/// Returns `InvalidInput` when nothing is left after trimming.
pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(Error::InvalidInput("symbol must not be empty".to_string()));
    }
    Ok(symbol)
}

/// Category label assigned to a holding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetCategory {
    Equity,
    Bond,
    Fund,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 3] = [Self::Equity, Self::Bond, Self::Fund];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::Bond => "Bond",
            Self::Fund => "Fund",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Investment profile used by the growth projector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentType {
    Equity,
    Bond,
}

impl InvestmentType {
    /// Multiplier applied to the nominal rate.
    pub fn rate_multiplier(&self) -> f64 {
        match self {
            Self::Equity => 1.2,
            Self::Bond => 0.8,
        }
    }
}

impl FromStr for InvestmentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "equity" | "equities" | "stock" | "stocks" => Ok(Self::Equity),
            "bond" | "bonds" => Ok(Self::Bond),
            other => Err(Error::InvalidInput(format!(
                "unknown investment type: {}",
                other
            ))),
        }
    }
}

/// History window understood by quote providers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::OneMonth => "1mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FiveYears => "5y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1d" => Ok(Self::OneDay),
            "1mo" => Ok(Self::OneMonth),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "5y" => Ok(Self::FiveYears),
            other => Err(Error::InvalidInput(format!("unknown period: {}", other))),
        }
    }
}

/// One close price in a chronological history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Descriptive metadata returned by a quote provider.
///
/// Every field is optional; providers fill what they know.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssetMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_pe: Option<f64>,
    /// Dividend yield as a decimal (0.025 for 2.5%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_high: Option<f64>,
}

impl AssetMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_quote_type(mut self, quote_type: impl Into<String>) -> Self {
        self.quote_type = Some(quote_type.into());
        self
    }
}

/// A position in the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    /// Ticker symbol (uppercase)
    pub symbol: String,
    pub category: AssetCategory,
    /// Units held, never negative
    pub quantity: f64,
    /// Unit price at acquisition
    pub purchase_price: f64,
    /// Last refreshed market price
    pub current_price: f64,
}

impl Holding {
    /// Create a holding bought at `price`.
    pub fn new(symbol: &str, category: AssetCategory, quantity: f64, price: f64) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            category,
            quantity,
            purchase_price: price,
            current_price: price,
        }
    }

    /// Market value at the current price.
    pub fn total_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    /// Total cost at the purchase price.
    pub fn total_cost(&self) -> f64 {
        self.quantity * self.purchase_price
    }

    /// Unrealized gain (positive) or loss (negative).
    pub fn profit_loss(&self) -> f64 {
        (self.current_price - self.purchase_price) * self.quantity
    }

    /// Flatten into a table row with derived values.
    pub fn to_row(&self) -> HoldingRow {
        HoldingRow {
            symbol: self.symbol.clone(),
            category: self.category,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            current_price: self.current_price,
            total_value: self.total_value(),
            profit_loss: self.profit_loss(),
        }
    }
}

/// Tabular view of a holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoldingRow {
    pub symbol: String,
    pub category: AssetCategory,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub profit_loss: f64,
}

/// Aggregated value of one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAllocation {
    pub category: AssetCategory,
    pub total_value: f64,
}

/// One row of a compounding schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GrowthPoint {
    pub year: u32,
    /// Accumulated capital, rounded to cents
    pub capital: f64,
}

/// Result of a risk estimation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RiskEstimate {
    Available {
        /// Annualized volatility as a decimal (0.25 for 25%)
        volatility: f64,
        /// 5th percentile of periodic returns, signed
        value_at_risk: f64,
    },
    Unavailable,
}

impl RiskEstimate {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    pub fn volatility(&self) -> Option<f64> {
        match self {
            Self::Available { volatility, .. } => Some(*volatility),
            Self::Unavailable => None,
        }
    }

    pub fn value_at_risk(&self) -> Option<f64> {
        match self {
            Self::Available { value_at_risk, .. } => Some(*value_at_risk),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for RiskEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available {
                volatility,
                value_at_risk,
            } => write!(
                f,
                "volatility {:.2}%, VaR(95%) {:.2}%",
                volatility * 100.0,
                value_at_risk * 100.0
            ),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Snapshot row of a watchlist symbol. `None` marks an unavailable figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistRow {
    pub symbol: String,
    pub current_price: Option<f64>,
    pub volatility: Option<f64>,
    pub value_at_risk: Option<f64>,
}

impl WatchlistRow {
    /// Row for a symbol whose data could not be fetched.
    pub fn unavailable(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            current_price: None,
            volatility: None,
            value_at_risk: None,
        }
    }
}

/// Close series of one symbol, for charting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

/// API response wrapper used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
