//! The seven key financial ratios.

use crate::error::{RatioError, Result};
use crate::line_item::{LineItem, LineItemValues};
use chrono::NaiveDate;
use finlens_data::StatementTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A financial ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ratio {
    /// Gross Profit / Total Revenue × 100
    GrossProfitMargin,
    /// Net Income / Total Revenue × 100
    NetProfitMargin,
    /// Net Income / Total Assets × 100
    ReturnOnAssets,
    /// Net Income / Stockholders Equity × 100
    ReturnOnEquity,
    /// Current Assets / Current Liabilities
    CurrentRatio,
    /// Total Liabilities / Stockholders Equity
    DebtToEquity,
    /// Net Income / Interest Expense
    InterestCoverage,
}

impl Ratio {
    /// All ratios in display order.
    pub const ALL: [Self; 7] = [
        Self::GrossProfitMargin,
        Self::NetProfitMargin,
        Self::ReturnOnAssets,
        Self::ReturnOnEquity,
        Self::CurrentRatio,
        Self::DebtToEquity,
        Self::InterestCoverage,
    ];

    /// Metric name as displayed.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GrossProfitMargin => "Gross Profit Margin (%)",
            Self::NetProfitMargin => "Net Profit Margin (%)",
            Self::ReturnOnAssets => "Return on Assets (%)",
            Self::ReturnOnEquity => "Return on Equity (%)",
            Self::CurrentRatio => "Current Ratio",
            Self::DebtToEquity => "Debt to Equity Ratio",
            Self::InterestCoverage => "Interest Coverage Ratio",
        }
    }

    /// Numerator and denominator line items.
    pub const fn operands(&self) -> (LineItem, LineItem) {
        match self {
            Self::GrossProfitMargin => (LineItem::GrossProfit, LineItem::TotalRevenue),
            Self::NetProfitMargin => (LineItem::NetIncome, LineItem::TotalRevenue),
            Self::ReturnOnAssets => (LineItem::NetIncome, LineItem::TotalAssets),
            Self::ReturnOnEquity => (LineItem::NetIncome, LineItem::StockholdersEquity),
            Self::CurrentRatio => (LineItem::CurrentAssets, LineItem::CurrentLiabilities),
            Self::DebtToEquity => (LineItem::TotalLiabilities, LineItem::StockholdersEquity),
            Self::InterestCoverage => (LineItem::NetIncome, LineItem::InterestExpense),
        }
    }

    /// Whether the ratio is expressed as a percentage.
    pub const fn is_percentage(&self) -> bool {
        matches!(
            self,
            Self::GrossProfitMargin
                | Self::NetProfitMargin
                | Self::ReturnOnAssets
                | Self::ReturnOnEquity
        )
    }

    /// Compute the ratio.
    ///
    /// # Errors
    /// Returns `RatioError::DivisionByZero` if the denominator is zero.
    pub fn compute(&self, values: &LineItemValues) -> Result<f64> {
        let (numerator, denominator) = self.operands();
        let denominator = values.get(denominator);
        if denominator == 0.0 {
            return Err(RatioError::DivisionByZero { ratio: self.name() });
        }

        let ratio = values.get(numerator) / denominator;
        Ok(if self.is_percentage() {
            ratio * 100.0
        } else {
            ratio
        })
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One computed ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioEntry {
    /// Which ratio
    pub ratio: Ratio,
    /// Computed value
    pub value: f64,
}

impl RatioEntry {
    /// Metric name as displayed.
    pub const fn metric(&self) -> &'static str {
        self.ratio.name()
    }
}

/// The seven ratios for one period, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    period: NaiveDate,
    entries: Vec<RatioEntry>,
}

impl RatioResult {
    /// Compute every ratio from extracted line items.
    pub fn from_values(values: &LineItemValues) -> Result<Self> {
        let entries = Ratio::ALL
            .iter()
            .map(|ratio| {
                ratio
                    .compute(values)
                    .map(|value| RatioEntry { ratio: *ratio, value })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            period: values.period,
            entries,
        })
    }

    /// Period the ratios describe.
    pub const fn period(&self) -> NaiveDate {
        self.period
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[RatioEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of a single ratio.
    pub fn get(&self, ratio: Ratio) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.ratio == ratio)
            .map(|e| e.value)
    }

    /// `(metric name, value)` pairs in display order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().map(|e| (e.metric(), e.value))
    }
}

/// Compute the key ratios for the most recent period.
///
/// Pure function of the three tables. The period is the income statement's
/// latest column; the other statements are read at that same period.
///
/// # Errors
/// Fails on the first missing period, missing line item, empty cell or zero
/// denominator.
pub fn compute_ratios(
    income_statement: &StatementTable,
    balance_sheet: &StatementTable,
    cash_flow: &StatementTable,
) -> Result<RatioResult> {
    let values = LineItemValues::extract(income_statement, balance_sheet, cash_flow)?;
    RatioResult::from_values(&values)
}
