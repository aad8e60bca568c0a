//! Shared fixtures for dashboard tests.

use chrono::NaiveDate;
use finlens::data::{InMemorySource, LineItemRow, StatementKind, StatementTable};

pub fn latest() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
}

pub fn prior() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
}

pub fn table(kind: StatementKind, items: &[(&str, f64, f64)]) -> StatementTable {
    let rows = items
        .iter()
        .map(|(label, latest, prior)| LineItemRow::new(*label, vec![Some(*latest), Some(*prior)]))
        .collect();
    StatementTable::new(kind, vec![latest(), prior()], rows).unwrap()
}

pub fn income_statement(interest_expense: f64) -> StatementTable {
    table(
        StatementKind::IncomeStatement,
        &[
            ("Total Revenue", 1000.0, 900.0),
            ("Cost Of Revenue", 600.0, 560.0),
            ("Gross Profit", 400.0, 340.0),
            ("Interest Expense", interest_expense, 45.0),
            ("Net Income", 100.0, 80.0),
        ],
    )
}

pub fn balance_sheet() -> StatementTable {
    table(
        StatementKind::BalanceSheet,
        &[
            ("Total Assets", 2000.0, 1900.0),
            ("Current Assets", 500.0, 450.0),
            ("Total Liabilities Net Minority Interest", 1200.0, 1150.0),
            ("Current Liabilities", 250.0, 240.0),
            ("Stockholders Equity", 800.0, 750.0),
        ],
    )
}

pub fn cash_flow() -> StatementTable {
    table(
        StatementKind::CashFlow,
        &[
            ("Operating Cash Flow", 150.0, 130.0),
            ("Capital Expenditure", -60.0, -55.0),
            ("Free Cash Flow", 90.0, 75.0),
        ],
    )
}

/// A source knowing one company, ACME, with complete statements.
pub fn acme_source(interest_expense: f64) -> InMemorySource {
    InMemorySource::new()
        .with_company("ACME", "Acme Corp")
        .with_statement("ACME", income_statement(interest_expense))
        .with_statement("ACME", balance_sheet())
        .with_statement("ACME", cash_flow())
}
