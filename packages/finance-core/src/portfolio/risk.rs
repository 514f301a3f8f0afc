//! Risk estimation over historical prices.
//!
//! Provides simple returns, annualized volatility, and historical 95% VaR.

use crate::types::{PricePoint, RiskEstimate};

/// Trading periods per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Percentile of the return distribution used as VaR (95% confidence).
pub const VAR_PERCENTILE: f64 = 5.0;

/// Estimate annualized volatility and 95% VaR from a chronological price series.
///
/// # Arguments
///
/// * `prices` - Close prices, oldest first
///
/// # Returns
///
/// `RiskEstimate::Available` with the sample standard deviation of simple
/// returns scaled by `sqrt(252)` and the linearly interpolated 5th percentile
/// of those returns. `RiskEstimate::Unavailable` when fewer than two returns
/// exist or either figure is not finite.
pub fn estimate(prices: &[f64]) -> RiskEstimate {
    let returns = simple_returns(prices);
    if returns.len() < 2 {
        return RiskEstimate::Unavailable;
    }

    let volatility = match sample_std_dev(&returns) {
        Some(std) => std * TRADING_DAYS_PER_YEAR.sqrt(),
        None => return RiskEstimate::Unavailable,
    };
    let value_at_risk = match percentile(&returns, VAR_PERCENTILE) {
        Some(p) => p,
        None => return RiskEstimate::Unavailable,
    };

    if !volatility.is_finite() || !value_at_risk.is_finite() {
        return RiskEstimate::Unavailable;
    }

    RiskEstimate::Available {
        volatility,
        value_at_risk,
    }
}

/// Estimate risk from a dated history using its close prices.
pub fn estimate_history(history: &[PricePoint]) -> RiskEstimate {
    let closes: Vec<f64> = history.iter().map(|p| p.close).collect();
    estimate(&closes)
}

/// Period-over-period simple returns.
///
/// A NaN price is replaced by the last valid price before differencing, so a
/// gap yields flat returns instead of removing the surrounding moves. Returns
/// that are still NaN (leading gaps, `0 / 0`) are dropped.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    let mut last = f64::NAN;
    let filled: Vec<f64> = prices
        .iter()
        .map(|&p| {
            if !p.is_nan() {
                last = p;
            }
            last
        })
        .collect();

    filled
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .filter(|r| !r.is_nan())
        .collect()
}

/// Sample standard deviation (n - 1 denominator).
///
/// Returns `None` for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt())
}

/// Percentile `q` (0..=100) with linear interpolation between closest ranks.
///
/// Returns `None` for an empty slice or `q` outside 0..=100.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&q) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}
