//! Best-effort asset category heuristic.

use crate::types::{AssetCategory, AssetMetadata};

const FINANCIAL_SERVICES: &str = "Financial Services";

/// Classify an asset from provider metadata.
///
/// Rules, first match wins:
/// 1. quote type or long name mentions "ETF" -> `Fund`
/// 2. sector is "Financial Services" or long name mentions "BOND" -> `Bond`
/// 3. anything else -> `Equity`
///
/// Missing fields count as empty strings. Misclassification is expected.
pub fn classify(metadata: &AssetMetadata) -> AssetCategory {
    let quote_type = metadata.quote_type.as_deref().unwrap_or("").to_uppercase();
    let long_name = metadata.long_name.as_deref().unwrap_or("").to_uppercase();
    let sector = metadata.sector.as_deref().unwrap_or("");

    if quote_type.contains("ETF") || long_name.contains("ETF") {
        AssetCategory::Fund
    } else if sector == FINANCIAL_SERVICES || long_name.contains("BOND") {
        AssetCategory::Bond
    } else {
        AssetCategory::Equity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etf_quote_type_is_fund_regardless_of_sector() {
        let meta = AssetMetadata::new()
            .with_quote_type("ETF")
            .with_sector("Financial Services");
        assert_eq!(classify(&meta), AssetCategory::Fund);
    }

    #[test]
    fn test_etf_in_long_name_case_insensitive() {
        let meta = AssetMetadata::new()
            .with_quote_type("EQUITY")
            .with_long_name("iShares Core S&P/TSX Capped Composite Index etf");
        assert_eq!(classify(&meta), AssetCategory::Fund);
    }

    #[test]
    fn test_financial_services_is_bond() {
        let meta = AssetMetadata::new()
            .with_quote_type("EQUITY")
            .with_long_name("JPMorgan Chase & Co.")
            .with_sector("Financial Services");
        assert_eq!(classify(&meta), AssetCategory::Bond);
    }

    #[test]
    fn test_bond_in_long_name() {
        let meta = AssetMetadata::new().with_long_name("Total Bond Market Index Fund");
        assert_eq!(classify(&meta), AssetCategory::Bond);
    }

    #[test]
    fn test_sector_match_is_exact() {
        let meta = AssetMetadata::new().with_sector("financial services");
        assert_eq!(classify(&meta), AssetCategory::Equity);
    }

    #[test]
    fn test_default_is_equity() {
        let meta = AssetMetadata::new()
            .with_quote_type("EQUITY")
            .with_long_name("Apple Inc.")
            .with_sector("Technology");
        assert_eq!(classify(&meta), AssetCategory::Equity);
        assert_eq!(classify(&AssetMetadata::default()), AssetCategory::Equity);
    }
}
