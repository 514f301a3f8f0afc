//! Compound-growth projection from yearly contributions.

use crate::types::{GrowthPoint, InvestmentType};
use crate::{Error, Result};

/// Project accumulated capital year by year.
///
/// Each year the contribution is added first, then the whole capital grows
/// at the nominal rate adjusted for the investment type (x1.2 equity,
/// x0.8 bond). Reported capital is rounded to cents; the running total is not.
///
/// # Arguments
///
/// * `annual_contribution` - Amount invested at the start of every year
/// * `annual_rate` - Nominal yearly rate in percent (5.0 for 5%)
/// * `years` - Number of years, at least 1
/// * `kind` - Investment type driving the rate adjustment
///
/// # Returns
///
/// One `GrowthPoint` per year, or `InvalidInput` for negative or
/// non-finite amounts and a zero horizon.
pub fn project(
    annual_contribution: f64,
    annual_rate: f64,
    years: u32,
    kind: InvestmentType,
) -> Result<Vec<GrowthPoint>> {
    if !annual_contribution.is_finite() || annual_contribution < 0.0 {
        return Err(Error::InvalidInput(
            "annual contribution must be a non-negative number".to_string(),
        ));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(Error::InvalidInput(
            "annual rate must be a non-negative percentage".to_string(),
        ));
    }
    if years == 0 {
        return Err(Error::InvalidInput("years must be at least 1".to_string()));
    }

    let effective_rate = annual_rate / 100.0 * kind.rate_multiplier();
    let mut capital = 0.0;

    let schedule = (1..=years)
        .map(|year| {
            capital = (capital + annual_contribution) * (1.0 + effective_rate);
            GrowthPoint {
                year,
                capital: round_cents(capital),
            }
        })
        .collect();

    Ok(schedule)
}

/// Capital at the end of a schedule, if any.
pub fn final_capital(schedule: &[GrowthPoint]) -> Option<f64> {
    schedule.last().map(|p| p.capital)
}

/// Round to 2 decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equity_schedule() {
        let schedule = project(1000.0, 5.0, 10, InvestmentType::Equity).unwrap();

        assert_eq!(schedule.len(), 10);
        assert_eq!(schedule[0].year, 1);
        assert_relative_eq!(schedule[0].capital, 1060.00, epsilon = 1e-9);
        // (1060 + 1000) * 1.06
        assert_relative_eq!(schedule[1].capital, 2183.60, epsilon = 1e-9);
        assert_eq!(schedule[9].year, 10);
    }

    #[test]
    fn test_bond_never_exceeds_equity() {
        for rate in [0.5, 1.0, 3.0, 5.0, 12.5] {
            let bond = project(500.0, rate, 15, InvestmentType::Bond).unwrap();
            let equity = project(500.0, rate, 15, InvestmentType::Equity).unwrap();
            for (b, e) in bond.iter().zip(&equity) {
                assert!(b.capital <= e.capital, "rate {}: {} > {}", rate, b.capital, e.capital);
            }
        }
    }

    #[test]
    fn test_bond_rate_adjustment() {
        // 5% * 0.8 = 4%
        let schedule = project(1000.0, 5.0, 1, InvestmentType::Bond).unwrap();
        assert_relative_eq!(schedule[0].capital, 1040.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_rate_accumulates_contributions() {
        let schedule = project(250.0, 0.0, 4, InvestmentType::Equity).unwrap();
        let capitals: Vec<f64> = schedule.iter().map(|p| p.capital).collect();
        assert_eq!(capitals, vec![250.0, 500.0, 750.0, 1000.0]);
    }

    #[test]
    fn test_rounding_does_not_compound() {
        // 1/3 of a cent drifts when rounded every year; the running total must not
        let schedule = project(0.01, 33.0, 3, InvestmentType::Equity).unwrap();
        let rate: f64 = 0.33 * 1.2;
        let exact = ((0.01 * (1.0 + rate) + 0.01) * (1.0 + rate) + 0.01) * (1.0 + rate);
        assert_relative_eq!(schedule[2].capital, round_cents(exact), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            project(1000.0, 5.0, 0, InvestmentType::Equity),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            project(-1.0, 5.0, 10, InvestmentType::Equity),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            project(1000.0, -0.5, 10, InvestmentType::Bond),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            project(f64::NAN, 5.0, 10, InvestmentType::Bond),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_final_capital() {
        let schedule = project(1000.0, 5.0, 2, InvestmentType::Equity).unwrap();
        assert_eq!(final_capital(&schedule), Some(schedule[1].capital));
        assert_eq!(final_capital(&[]), None);
    }
}
