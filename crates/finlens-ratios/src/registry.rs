//! Ratio Registry
//!
//! Static metadata for every ratio: category, description and the line items
//! it is built from.

use crate::line_item::LineItem;
use crate::ratio::Ratio;
use std::collections::HashMap;

/// Ratio categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatioCategory {
    /// Margins and returns
    Profitability,
    /// Short-term solvency
    Liquidity,
    /// Capital structure
    Leverage,
    /// Ability to service debt
    Coverage,
}

impl RatioCategory {
    /// Category name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Profitability => "Profitability",
            Self::Liquidity => "Liquidity",
            Self::Leverage => "Leverage",
            Self::Coverage => "Coverage",
        }
    }
}

/// Ratio metadata
#[derive(Debug, Clone)]
pub struct RatioInfo {
    /// The ratio
    pub ratio: Ratio,
    /// Ratio category
    pub category: RatioCategory,
    /// Brief description of what the ratio measures
    pub description: &'static str,
    /// Whether the value is a percentage
    pub percentage: bool,
    /// Line items the ratio needs
    pub line_items: [LineItem; 2],
}

impl RatioInfo {
    /// Metric name as displayed.
    pub const fn name(&self) -> &'static str {
        self.ratio.name()
    }
}

/// Get all available ratio info, in display order
pub fn available_ratios() -> Vec<RatioInfo> {
    Ratio::ALL
        .into_iter()
        .map(|ratio| {
            let (category, description) = match ratio {
                Ratio::GrossProfitMargin => (
                    RatioCategory::Profitability,
                    "Share of revenue left after cost of revenue",
                ),
                Ratio::NetProfitMargin => (
                    RatioCategory::Profitability,
                    "Share of revenue kept as net income",
                ),
                Ratio::ReturnOnAssets => (
                    RatioCategory::Profitability,
                    "Net income earned per unit of total assets",
                ),
                Ratio::ReturnOnEquity => (
                    RatioCategory::Profitability,
                    "Net income earned per unit of shareholder equity",
                ),
                Ratio::CurrentRatio => (
                    RatioCategory::Liquidity,
                    "Current assets available per unit of current liabilities",
                ),
                Ratio::DebtToEquity => (
                    RatioCategory::Leverage,
                    "Total liabilities per unit of shareholder equity",
                ),
                Ratio::InterestCoverage => (
                    RatioCategory::Coverage,
                    "Net income relative to interest expense",
                ),
            };
            let (numerator, denominator) = ratio.operands();

            RatioInfo {
                ratio,
                category,
                description,
                percentage: ratio.is_percentage(),
                line_items: [numerator, denominator],
            }
        })
        .collect()
}

/// Get ratios by category
pub fn ratios_by_category(category: RatioCategory) -> Vec<RatioInfo> {
    available_ratios()
        .into_iter()
        .filter(|r| r.category == category)
        .collect()
}

/// Get ratio info by display name
pub fn get_ratio_info(name: &str) -> Option<RatioInfo> {
    available_ratios().into_iter().find(|r| r.name() == name)
}

/// Count ratios by category
pub fn count_by_category() -> HashMap<RatioCategory, usize> {
    let mut counts = HashMap::new();
    for info in available_ratios() {
        *counts.entry(info.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_ratios_count() {
        assert_eq!(available_ratios().len(), 7);
    }

    #[test]
    fn test_ratios_by_category() {
        assert_eq!(ratios_by_category(RatioCategory::Profitability).len(), 4);
        assert_eq!(ratios_by_category(RatioCategory::Liquidity).len(), 1);
        assert_eq!(ratios_by_category(RatioCategory::Leverage).len(), 1);
        assert_eq!(ratios_by_category(RatioCategory::Coverage).len(), 1);
    }

    #[test]
    fn test_get_ratio_info() {
        let info = get_ratio_info("Interest Coverage Ratio").unwrap();
        assert_eq!(info.ratio, Ratio::InterestCoverage);
        assert_eq!(info.category, RatioCategory::Coverage);
        assert!(info.line_items.contains(&LineItem::InterestExpense));
        assert!(!info.percentage);

        assert!(get_ratio_info("Quick Ratio").is_none());
    }

    #[test]
    fn test_count_by_category() {
        let counts = count_by_category();
        assert_eq!(counts.get(&RatioCategory::Profitability), Some(&4));
        assert_eq!(counts.values().sum::<usize>(), 7);
    }

    #[test]
    fn test_operating_cash_flow_unused() {
        for info in available_ratios() {
            assert!(!info.line_items.contains(&LineItem::OperatingCashFlow));
        }
    }
}
