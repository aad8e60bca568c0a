//! Dashboard actions.
//!
//! A request is a ticker and an action. The ticker is resolved to a company
//! first; an unknown ticker stops the request before any statement is
//! fetched or any ratio computed.

use crate::error::{DashboardError, Result};
use crate::selector::{StatementView, select_statement};
use finlens_data::{Financials, FinancialsSource, StatementFrequency, StatementKind, Ticker};
use finlens_ratios::{RatioResult, compute_ratios};
use std::fmt;
use tracing::{debug, info, instrument};

/// What to do with a resolved company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Compute the key ratios for the most recent period.
    AnalyzePerformance,
    /// Show one financial statement as fetched.
    ViewStatements(StatementKind),
}

impl Action {
    /// Display name of the action.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AnalyzePerformance => "Analyze Performance",
            Self::ViewStatements(_) => "View Financial Statements",
        }
    }

    /// Build an action from its display name and, for the view action, a
    /// document name.
    ///
    /// # Errors
    /// Returns `DashboardError::UnknownAction` or
    /// `DashboardError::UnknownDocument` for unrecognised names.
    pub fn from_names(action: &str, document: Option<&str>) -> Result<Self> {
        match action {
            "Analyze Performance" => Ok(Self::AnalyzePerformance),
            "View Financial Statements" => {
                let document = document.unwrap_or(StatementKind::ALL[0].name());
                StatementKind::from_name(document)
                    .map(Self::ViewStatements)
                    .ok_or_else(|| DashboardError::UnknownDocument(document.to_string()))
            }
            other => Err(DashboardError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnalyzePerformance => f.write_str(self.name()),
            Self::ViewStatements(kind) => write!(f, "{}: {}", self.name(), kind),
        }
    }
}

/// Result of running an action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    /// Key ratios of the most recent period.
    Analysis {
        /// Company short name
        company: String,
        /// The seven ratios in display order
        ratios: RatioResult,
    },
    /// A statement selected for display.
    Statement {
        /// Company short name
        company: String,
        /// The selected statement
        view: StatementView,
    },
}

impl ActionOutput {
    /// Company short name, for the "Company: <name>" line.
    pub fn company(&self) -> &str {
        match self {
            Self::Analysis { company, .. } | Self::Statement { company, .. } => company,
        }
    }
}

/// Normalize ticker input; blank input means there is nothing to do.
pub fn validate_ticker(input: &str) -> Option<Ticker> {
    Ticker::parse(input).ok()
}

/// Run an action against already fetched financials.
///
/// # Errors
/// Propagates any ratio calculation failure.
pub fn run_action(financials: &Financials, action: Action) -> Result<ActionOutput> {
    let company = financials.company_name().to_string();

    match action {
        Action::AnalyzePerformance => {
            let ratios = compute_ratios(
                financials.income_statement(),
                financials.balance_sheet(),
                financials.cash_flow(),
            )?;
            debug!(period = %ratios.period(), "computed ratios");
            Ok(ActionOutput::Analysis { company, ratios })
        }
        Action::ViewStatements(kind) => {
            let view = select_statement(financials, kind.name())?;
            Ok(ActionOutput::Statement { company, view })
        }
    }
}

/// Request handler over a [`FinancialsSource`].
#[derive(Debug)]
pub struct Dashboard<S> {
    source: S,
    frequency: StatementFrequency,
}

impl<S: FinancialsSource> Dashboard<S> {
    /// Create a dashboard reading annual statements.
    pub fn new(source: S) -> Self {
        Self {
            source,
            frequency: StatementFrequency::Annual,
        }
    }

    /// Read statements at the given frequency.
    pub const fn with_frequency(mut self, frequency: StatementFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// The underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Statement frequency used for requests.
    pub const fn frequency(&self) -> StatementFrequency {
        self.frequency
    }

    /// Handle one request.
    ///
    /// Returns `Ok(None)` for blank input.
    ///
    /// # Errors
    /// Fails with `DataError::InvalidTicker` (wrapped) when no company is
    /// found, and with any fetch or ratio error otherwise.
    #[instrument(skip(self), fields(frequency = %self.frequency))]
    pub async fn submit(&self, input: &str, action: Action) -> Result<Option<ActionOutput>> {
        let Some(ticker) = validate_ticker(input) else {
            debug!("blank ticker input");
            return Ok(None);
        };

        let financials = Financials::fetch(&self.source, &ticker, self.frequency).await?;
        info!(company = %financials.company_name(), action = %action, "running action");

        run_action(&financials, action).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finlens_data::{LineItemRow, StatementTable};
    use rstest::rstest;

    fn financials() -> Financials {
        let period = vec![NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()];
        let table = |kind, label: &str| {
            StatementTable::new(kind, period.clone(), vec![LineItemRow::new(label, vec![Some(1.0)])])
                .unwrap()
        };

        Financials::new(
            Ticker::parse("ACME").unwrap(),
            "Acme Corp".to_string(),
            StatementFrequency::Annual,
            table(StatementKind::IncomeStatement, "Total Revenue"),
            table(StatementKind::BalanceSheet, "Total Assets"),
            table(StatementKind::CashFlow, "Free Cash Flow"),
        )
        .unwrap()
    }

    #[rstest]
    #[case("aapl", Some("AAPL"))]
    #[case("  msft \n", Some("MSFT"))]
    #[case("", None)]
    #[case("   ", None)]
    fn test_validate_ticker(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            validate_ticker(input).as_ref().map(Ticker::as_str),
            expected
        );
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::AnalyzePerformance.name(), "Analyze Performance");
        assert_eq!(
            Action::ViewStatements(StatementKind::CashFlow).name(),
            "View Financial Statements"
        );
    }

    #[rstest]
    #[case("Analyze Performance", None, Action::AnalyzePerformance)]
    #[case(
        "View Financial Statements",
        None,
        Action::ViewStatements(StatementKind::BalanceSheet)
    )]
    #[case(
        "View Financial Statements",
        Some("Income Statement"),
        Action::ViewStatements(StatementKind::IncomeStatement)
    )]
    fn test_action_from_names(
        #[case] action: &str,
        #[case] document: Option<&str>,
        #[case] expected: Action,
    ) {
        assert_eq!(Action::from_names(action, document).unwrap(), expected);
    }

    #[test]
    fn test_view_action_matches_selector() {
        let financials = financials();

        for kind in StatementKind::ALL {
            let output = run_action(&financials, Action::ViewStatements(kind)).unwrap();
            let expected = select_statement(&financials, kind.name()).unwrap();

            assert_eq!(output.company(), "Acme Corp");
            assert!(matches!(output, ActionOutput::Statement { view, .. } if view == expected));
        }
    }

    #[test]
    fn test_action_from_unknown_names() {
        assert!(matches!(
            Action::from_names("Forecast", None),
            Err(DashboardError::UnknownAction(_))
        ));
        assert!(matches!(
            Action::from_names("View Financial Statements", Some("10-K")),
            Err(DashboardError::UnknownDocument(_))
        ));
    }
}
