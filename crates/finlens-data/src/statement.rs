//! Financial statement tables.
//!
//! A [`StatementTable`] holds one row per provider-labelled line item and one
//! column per reporting period. Periods are kept most recent first, so the
//! latest period always sits in the first value column.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the label column in the [`DataFrame`] view of a statement.
pub const LABEL_COLUMN: &str = "index";

/// The three financial statements a company reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Income statement (profit and loss)
    IncomeStatement,
    /// Balance sheet
    BalanceSheet,
    /// Cash-flow statement
    CashFlow,
}

impl StatementKind {
    /// Statements in document-menu order.
    pub const ALL: [Self; 3] = [Self::BalanceSheet, Self::IncomeStatement, Self::CashFlow];

    /// Display name of the statement document.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IncomeStatement => "Income Statement",
            Self::BalanceSheet => "Balance Sheet",
            Self::CashFlow => "Cash Flow Statement",
        }
    }

    /// Look a statement up by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reporting frequency of a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementFrequency {
    /// Fiscal-year statements (10-K)
    #[default]
    Annual,
    /// Fiscal-quarter statements (10-Q)
    Quarterly,
}

impl StatementFrequency {
    /// Prefix Yahoo uses for timeseries keys of this frequency.
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }

    /// Parse from a prefix or a plain name.
    pub fn from_prefix(s: &str) -> Result<Self> {
        match s {
            "annual" => Ok(Self::Annual),
            "quarterly" => Ok(Self::Quarterly),
            _ => Err(DataError::Parse(format!("Invalid statement frequency: {}", s))),
        }
    }
}

impl fmt::Display for StatementFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A single labelled line item with one value per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRow {
    /// Provider-defined label, e.g. "Total Revenue"
    pub label: String,
    /// Values aligned with the table's periods; `None` where nothing was reported
    pub values: Vec<Option<f64>>,
}

impl LineItemRow {
    /// Create a new row.
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// A financial statement: line items as rows, reporting periods as columns.
///
/// Deserialized tables go through [`StatementTable::new`] and are rejected
/// when malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStatementTable")]
pub struct StatementTable {
    kind: StatementKind,
    periods: Vec<NaiveDate>,
    rows: Vec<LineItemRow>,
}

#[derive(Deserialize)]
struct RawStatementTable {
    kind: StatementKind,
    periods: Vec<NaiveDate>,
    rows: Vec<LineItemRow>,
}

impl TryFrom<RawStatementTable> for StatementTable {
    type Error = DataError;

    fn try_from(raw: RawStatementTable) -> Result<Self> {
        Self::new(raw.kind, raw.periods, raw.rows)
    }
}

impl StatementTable {
    /// Create a table from periods (most recent first) and rows.
    ///
    /// # Errors
    /// Returns `DataError::Parse` if a row does not have one value per period,
    /// or if the periods are not strictly descending.
    pub fn new(kind: StatementKind, periods: Vec<NaiveDate>, rows: Vec<LineItemRow>) -> Result<Self> {
        if periods.windows(2).any(|w| w[0] <= w[1]) {
            return Err(DataError::Parse(format!(
                "{} periods must be unique and most recent first",
                kind
            )));
        }

        if let Some(row) = rows.iter().find(|r| r.values.len() != periods.len()) {
            return Err(DataError::Parse(format!(
                "{} row '{}' has {} values for {} periods",
                kind,
                row.label,
                row.values.len(),
                periods.len()
            )));
        }

        Ok(Self {
            kind,
            periods,
            rows,
        })
    }

    /// Create a table with no line items and no periods.
    pub const fn empty(kind: StatementKind) -> Self {
        Self {
            kind,
            periods: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Build a table from `(label, period, value)` observations.
    ///
    /// Rows keep the order in which their label first appears; periods are
    /// sorted most recent first. A repeated `(label, period)` pair keeps the
    /// last value seen.
    pub fn from_observations<I, S>(kind: StatementKind, observations: I) -> Self
    where
        I: IntoIterator<Item = (S, NaiveDate, Option<f64>)>,
        S: Into<String>,
    {
        let observations: Vec<(String, NaiveDate, Option<f64>)> = observations
            .into_iter()
            .map(|(label, date, value)| (label.into(), date, value))
            .collect();

        let mut periods: Vec<NaiveDate> = observations.iter().map(|(_, d, _)| *d).collect();
        periods.sort_unstable_by(|a, b| b.cmp(a));
        periods.dedup();

        let mut rows: Vec<LineItemRow> = Vec::new();
        for (label, date, value) in observations {
            let Ok(idx) = periods.binary_search_by(|p| date.cmp(p)) else {
                continue;
            };
            let pos = match rows.iter().position(|r| r.label == label) {
                Some(pos) => pos,
                None => {
                    rows.push(LineItemRow::new(label, vec![None; periods.len()]));
                    rows.len() - 1
                }
            };
            rows[pos].values[idx] = value;
        }

        Self {
            kind,
            periods,
            rows,
        }
    }

    /// Which statement this table holds.
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Reporting periods, most recent first.
    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    /// Line items in provider order.
    pub fn rows(&self) -> &[LineItemRow] {
        &self.rows
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no line items.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The latest reporting period, if any.
    pub fn most_recent_period(&self) -> Option<NaiveDate> {
        self.periods.first().copied()
    }

    /// Column position of a period.
    pub fn period_index(&self, period: NaiveDate) -> Option<usize> {
        self.periods.iter().position(|p| *p == period)
    }

    /// Find a line item by exact label.
    pub fn row(&self, label: &str) -> Option<&LineItemRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Convert to a DataFrame: a label column followed by one `f64` column per
    /// period, named by ISO date.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let labels: Vec<&str> = self.rows.iter().map(|r| r.label.as_str()).collect();

        let mut columns: Vec<Column> = Vec::with_capacity(self.periods.len() + 1);
        columns.push(Series::new(LABEL_COLUMN.into(), labels).into());

        for (idx, period) in self.periods.iter().enumerate() {
            let values: Vec<Option<f64>> = self
                .rows
                .iter()
                .map(|r| r.values.get(idx).copied().flatten())
                .collect();
            columns.push(Series::new(period.to_string().into(), values).into());
        }

        Ok(DataFrame::new(columns)?)
    }
}
