//! The fetched statements of one company.

use crate::error::{DataError, Result};
use crate::statement::{StatementFrequency, StatementKind, StatementTable};
use async_trait::async_trait;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// An exchange ticker symbol, trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize free-text ticker input.
    ///
    /// # Errors
    /// Returns `DataError::InvalidSymbol` if the input is blank.
    pub fn parse(input: &str) -> Result<Self> {
        let symbol = input.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }
        Ok(Self(symbol))
    }

    /// The normalized symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A provider of company identity and financial statements.
#[async_trait]
pub trait FinancialsSource: Send + Sync {
    /// Short company name for the ticker, or `None` if the provider knows no
    /// company behind it.
    async fn company_name(&self, ticker: &Ticker) -> Result<Option<String>>;

    /// Fetch one statement table, most recent period first.
    async fn fetch_statement(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
        frequency: StatementFrequency,
    ) -> Result<StatementTable>;
}

/// The three financial statements of a company, as fetched for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    ticker: Ticker,
    company_name: String,
    frequency: StatementFrequency,
    income_statement: StatementTable,
    balance_sheet: StatementTable,
    cash_flow: StatementTable,
}

impl Financials {
    /// Assemble financials from already fetched tables.
    ///
    /// # Errors
    /// Returns `DataError::Parse` if a table is passed in the wrong slot.
    pub fn new(
        ticker: Ticker,
        company_name: String,
        frequency: StatementFrequency,
        income_statement: StatementTable,
        balance_sheet: StatementTable,
        cash_flow: StatementTable,
    ) -> Result<Self> {
        for (table, expected) in [
            (&income_statement, StatementKind::IncomeStatement),
            (&balance_sheet, StatementKind::BalanceSheet),
            (&cash_flow, StatementKind::CashFlow),
        ] {
            if table.kind() != expected {
                return Err(DataError::Parse(format!(
                    "expected {} but got {}",
                    expected,
                    table.kind()
                )));
            }
        }

        Ok(Self {
            ticker,
            company_name,
            frequency,
            income_statement,
            balance_sheet,
            cash_flow,
        })
    }

    /// Resolve the company behind `ticker` and fetch its three statements.
    ///
    /// # Errors
    /// Returns `DataError::InvalidTicker` without fetching any statement if the
    /// source knows no company for the ticker.
    #[instrument(skip(source, ticker), fields(ticker = %ticker))]
    pub async fn fetch<S>(source: &S, ticker: &Ticker, frequency: StatementFrequency) -> Result<Self>
    where
        S: FinancialsSource + ?Sized,
    {
        let Some(company_name) = source.company_name(ticker).await? else {
            info!("no company found");
            return Err(DataError::InvalidTicker {
                symbol: ticker.to_string(),
            });
        };
        debug!(company = %company_name, "resolved company");

        let income_statement = source
            .fetch_statement(ticker, StatementKind::IncomeStatement, frequency)
            .await?;
        let balance_sheet = source
            .fetch_statement(ticker, StatementKind::BalanceSheet, frequency)
            .await?;
        let cash_flow = source
            .fetch_statement(ticker, StatementKind::CashFlow, frequency)
            .await?;

        info!(
            income_rows = income_statement.len(),
            balance_rows = balance_sheet.len(),
            cash_flow_rows = cash_flow.len(),
            "fetched statements"
        );

        Self::new(
            ticker.clone(),
            company_name,
            frequency,
            income_statement,
            balance_sheet,
            cash_flow,
        )
    }

    /// The ticker these statements belong to.
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Company short name.
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Reporting frequency of the statements.
    pub const fn frequency(&self) -> StatementFrequency {
        self.frequency
    }

    /// Income statement.
    pub const fn income_statement(&self) -> &StatementTable {
        &self.income_statement
    }

    /// Balance sheet.
    pub const fn balance_sheet(&self) -> &StatementTable {
        &self.balance_sheet
    }

    /// Cash-flow statement.
    pub const fn cash_flow(&self) -> &StatementTable {
        &self.cash_flow
    }

    /// Select a statement by kind.
    pub const fn statement(&self, kind: StatementKind) -> &StatementTable {
        match kind {
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("aapl", "AAPL")]
    #[case("  msft ", "MSFT")]
    #[case("brk-b", "BRK-B")]
    fn test_ticker_parse(#[case] input: &str, #[case] expected: &str) {
        let ticker = Ticker::parse(input).unwrap();
        assert_eq!(ticker.as_str(), expected);
        assert_eq!(ticker.to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_ticker_parse_blank(#[case] input: &str) {
        assert!(matches!(
            Ticker::parse(input),
            Err(DataError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_new_rejects_swapped_tables() {
        let result = Financials::new(
            Ticker::parse("AAPL").unwrap(),
            "Apple Inc.".to_string(),
            StatementFrequency::Annual,
            StatementTable::empty(StatementKind::BalanceSheet),
            StatementTable::empty(StatementKind::IncomeStatement),
            StatementTable::empty(StatementKind::CashFlow),
        );
        assert!(matches!(result, Err(DataError::Parse(_))));
    }

    #[test]
    fn test_statement_selects_by_kind() {
        let financials = Financials::new(
            Ticker::parse("AAPL").unwrap(),
            "Apple Inc.".to_string(),
            StatementFrequency::Annual,
            StatementTable::empty(StatementKind::IncomeStatement),
            StatementTable::empty(StatementKind::BalanceSheet),
            StatementTable::empty(StatementKind::CashFlow),
        )
        .unwrap();

        for kind in StatementKind::ALL {
            assert_eq!(financials.statement(kind).kind(), kind);
        }
        assert_eq!(financials.company_name(), "Apple Inc.");
    }
}
