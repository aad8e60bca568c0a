//! In-memory financials source.
//!
//! Serves fixed statements without touching the network. Useful for tests and
//! offline demos.

use crate::error::Result;
use crate::financials::{FinancialsSource, Ticker};
use crate::statement::{StatementFrequency, StatementKind, StatementTable};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
struct Company {
    name: String,
    statements: HashMap<StatementKind, StatementTable>,
}

/// A [`FinancialsSource`] backed by fixed tables.
///
/// Tickers that were never registered resolve to no company. Registered
/// companies without a table for some statement serve an empty table. The
/// same tables are served for every frequency.
#[derive(Debug, Default)]
pub struct InMemorySource {
    companies: HashMap<String, Company>,
    statement_requests: AtomicUsize,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a company under `symbol`.
    pub fn with_company(mut self, symbol: &str, name: &str) -> Self {
        self.companies.insert(
            symbol.to_uppercase(),
            Company {
                name: name.to_string(),
                statements: HashMap::new(),
            },
        );
        self
    }

    /// Attach a statement to a registered company; unknown symbols are ignored.
    pub fn with_statement(mut self, symbol: &str, table: StatementTable) -> Self {
        if let Some(company) = self.companies.get_mut(&symbol.to_uppercase()) {
            company.statements.insert(table.kind(), table);
        }
        self
    }

    /// How many statement fetches have been served.
    pub fn statement_requests(&self) -> usize {
        self.statement_requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FinancialsSource for InMemorySource {
    async fn company_name(&self, ticker: &Ticker) -> Result<Option<String>> {
        Ok(self.companies.get(ticker.as_str()).map(|c| c.name.clone()))
    }

    async fn fetch_statement(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
        _frequency: StatementFrequency,
    ) -> Result<StatementTable> {
        self.statement_requests.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .companies
            .get(ticker.as_str())
            .and_then(|c| c.statements.get(&kind))
            .cloned()
            .unwrap_or_else(|| StatementTable::empty(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::financials::Financials;
    use chrono::NaiveDate;

    fn balance_sheet() -> StatementTable {
        StatementTable::from_observations(
            StatementKind::BalanceSheet,
            vec![(
                "Total Assets",
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                Some(2000.0),
            )],
        )
    }

    #[tokio::test]
    async fn test_fetch_registered_company() {
        let source = InMemorySource::new()
            .with_company("acme", "Acme Corp")
            .with_statement("ACME", balance_sheet());

        let ticker = Ticker::parse("acme").unwrap();
        let financials = Financials::fetch(&source, &ticker, StatementFrequency::Annual)
            .await
            .unwrap();

        assert_eq!(financials.company_name(), "Acme Corp");
        assert_eq!(financials.balance_sheet(), &balance_sheet());
        assert!(financials.income_statement().is_empty());
        assert_eq!(source.statement_requests(), 3);
    }

    #[tokio::test]
    async fn test_unknown_ticker_fetches_nothing() {
        let source = InMemorySource::new().with_company("ACME", "Acme Corp");

        let ticker = Ticker::parse("ZZZZ").unwrap();
        let result = Financials::fetch(&source, &ticker, StatementFrequency::Annual).await;

        assert!(matches!(result, Err(DataError::InvalidTicker { .. })));
        assert_eq!(source.statement_requests(), 0);
    }
}
