//! Line items read from the statements.
//!
//! Every value is taken from the most recent period of the income statement;
//! the balance sheet and cash-flow statement are read at that same period.

use crate::error::{RatioError, Result};
use chrono::NaiveDate;
use finlens_data::{StatementKind, StatementTable};
use serde::{Deserialize, Serialize};

/// The line items the ratios are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    /// Total Revenue
    TotalRevenue,
    /// Gross Profit
    GrossProfit,
    /// Net Income
    NetIncome,
    /// Interest Expense
    InterestExpense,
    /// Total Assets
    TotalAssets,
    /// Stockholders Equity
    StockholdersEquity,
    /// Total Liabilities, net of minority interest
    TotalLiabilities,
    /// Current Assets
    CurrentAssets,
    /// Current Liabilities
    CurrentLiabilities,
    /// Operating Cash Flow
    OperatingCashFlow,
}

impl LineItem {
    /// All line items in extraction order.
    pub const ALL: [Self; 10] = [
        Self::TotalRevenue,
        Self::GrossProfit,
        Self::NetIncome,
        Self::TotalAssets,
        Self::StockholdersEquity,
        Self::TotalLiabilities,
        Self::CurrentAssets,
        Self::CurrentLiabilities,
        Self::OperatingCashFlow,
        Self::InterestExpense,
    ];

    /// Exact row label in the provider's statement.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::NetIncome => "Net Income",
            Self::InterestExpense => "Interest Expense",
            Self::TotalAssets => "Total Assets",
            Self::StockholdersEquity => "Stockholders Equity",
            Self::TotalLiabilities => "Total Liabilities Net Minority Interest",
            Self::CurrentAssets => "Current Assets",
            Self::CurrentLiabilities => "Current Liabilities",
            Self::OperatingCashFlow => "Operating Cash Flow",
        }
    }

    /// Statement the line item is read from.
    pub const fn statement(&self) -> StatementKind {
        match self {
            Self::TotalRevenue | Self::GrossProfit | Self::NetIncome | Self::InterestExpense => {
                StatementKind::IncomeStatement
            }
            Self::TotalAssets
            | Self::StockholdersEquity
            | Self::TotalLiabilities
            | Self::CurrentAssets
            | Self::CurrentLiabilities => StatementKind::BalanceSheet,
            Self::OperatingCashFlow => StatementKind::CashFlow,
        }
    }
}

/// Line-item values for a single period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItemValues {
    /// Period the values were read from
    pub period: NaiveDate,
    /// Total Revenue
    pub total_revenue: f64,
    /// Gross Profit
    pub gross_profit: f64,
    /// Net Income
    pub net_income: f64,
    /// Interest Expense
    pub interest_expense: f64,
    /// Total Assets
    pub total_assets: f64,
    /// Stockholders Equity
    pub stockholders_equity: f64,
    /// Total Liabilities Net Minority Interest
    pub total_liabilities: f64,
    /// Current Assets
    pub current_assets: f64,
    /// Current Liabilities
    pub current_liabilities: f64,
    /// Operating Cash Flow. Extracted but not used by any ratio.
    pub operating_cash_flow: f64,
}

impl LineItemValues {
    /// Read all line items at the income statement's most recent period.
    ///
    /// # Errors
    /// - `RatioError::MissingPeriod` if the income statement has no periods or
    ///   another statement lacks the income statement's latest period
    /// - `RatioError::MissingLineItem` if a label is absent
    /// - `RatioError::MissingValue` if a label has no value for the period
    pub fn extract(
        income_statement: &StatementTable,
        balance_sheet: &StatementTable,
        cash_flow: &StatementTable,
    ) -> Result<Self> {
        let period =
            income_statement
                .most_recent_period()
                .ok_or_else(|| RatioError::MissingPeriod {
                    statement: StatementKind::IncomeStatement,
                    period: "latest".to_string(),
                })?;

        let value = |item: LineItem| -> Result<f64> {
            let table = match item.statement() {
                StatementKind::IncomeStatement => income_statement,
                StatementKind::BalanceSheet => balance_sheet,
                StatementKind::CashFlow => cash_flow,
            };
            lookup(table, item, period)
        };

        Ok(Self {
            period,
            total_revenue: value(LineItem::TotalRevenue)?,
            gross_profit: value(LineItem::GrossProfit)?,
            net_income: value(LineItem::NetIncome)?,
            total_assets: value(LineItem::TotalAssets)?,
            stockholders_equity: value(LineItem::StockholdersEquity)?,
            total_liabilities: value(LineItem::TotalLiabilities)?,
            current_assets: value(LineItem::CurrentAssets)?,
            current_liabilities: value(LineItem::CurrentLiabilities)?,
            operating_cash_flow: value(LineItem::OperatingCashFlow)?,
            interest_expense: value(LineItem::InterestExpense)?,
        })
    }

    /// Value of a single line item.
    pub const fn get(&self, item: LineItem) -> f64 {
        match item {
            LineItem::TotalRevenue => self.total_revenue,
            LineItem::GrossProfit => self.gross_profit,
            LineItem::NetIncome => self.net_income,
            LineItem::InterestExpense => self.interest_expense,
            LineItem::TotalAssets => self.total_assets,
            LineItem::StockholdersEquity => self.stockholders_equity,
            LineItem::TotalLiabilities => self.total_liabilities,
            LineItem::CurrentAssets => self.current_assets,
            LineItem::CurrentLiabilities => self.current_liabilities,
            LineItem::OperatingCashFlow => self.operating_cash_flow,
        }
    }
}

fn lookup(table: &StatementTable, item: LineItem, period: NaiveDate) -> Result<f64> {
    let idx = table
        .period_index(period)
        .ok_or_else(|| RatioError::MissingPeriod {
            statement: table.kind(),
            period: period.to_string(),
        })?;

    let row = table
        .row(item.label())
        .ok_or(RatioError::MissingLineItem {
            label: item.label(),
            statement: table.kind(),
        })?;

    row.values
        .get(idx)
        .copied()
        .flatten()
        .ok_or(RatioError::MissingValue {
            label: item.label(),
            statement: table.kind(),
            period,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(kind: StatementKind, items: &[(&str, f64)]) -> StatementTable {
        StatementTable::from_observations(
            kind,
            items
                .iter()
                .map(|(label, v)| (*label, date(2024, 12, 31), Some(*v))),
        )
    }

    #[test]
    fn test_labels_belong_to_one_statement() {
        let income: Vec<LineItem> = LineItem::ALL
            .into_iter()
            .filter(|i| i.statement() == StatementKind::IncomeStatement)
            .collect();
        assert_eq!(income.len(), 4);
        assert_eq!(
            LineItem::TotalLiabilities.label(),
            "Total Liabilities Net Minority Interest"
        );
        assert_eq!(
            LineItem::OperatingCashFlow.statement(),
            StatementKind::CashFlow
        );
    }

    #[test]
    fn test_missing_cash_flow_item() {
        let income = table(
            StatementKind::IncomeStatement,
            &[
                ("Total Revenue", 1000.0),
                ("Gross Profit", 400.0),
                ("Net Income", 100.0),
                ("Interest Expense", 50.0),
            ],
        );
        let balance = table(
            StatementKind::BalanceSheet,
            &[
                ("Total Assets", 2000.0),
                ("Stockholders Equity", 800.0),
                ("Total Liabilities Net Minority Interest", 1200.0),
                ("Current Assets", 500.0),
                ("Current Liabilities", 250.0),
            ],
        );
        let cash = table(StatementKind::CashFlow, &[("Free Cash Flow", 10.0)]);

        let err = LineItemValues::extract(&income, &balance, &cash).unwrap_err();
        assert_eq!(
            err,
            RatioError::MissingLineItem {
                label: "Operating Cash Flow",
                statement: StatementKind::CashFlow,
            }
        );
    }

    #[test]
    fn test_empty_income_statement() {
        let empty = StatementTable::empty(StatementKind::IncomeStatement);
        let balance = StatementTable::empty(StatementKind::BalanceSheet);
        let cash = StatementTable::empty(StatementKind::CashFlow);

        let err = LineItemValues::extract(&empty, &balance, &cash).unwrap_err();
        assert!(matches!(
            err,
            RatioError::MissingPeriod {
                statement: StatementKind::IncomeStatement,
                ..
            }
        ));
    }
}
