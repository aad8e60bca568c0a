//! Error types for ratio calculations.

use finlens_data::StatementKind;
use thiserror::Error;

/// Result type for ratio calculations.
pub type Result<T> = std::result::Result<T, RatioError>;

/// Errors that abort a ratio calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatioError {
    /// A statement has no row with the expected label.
    #[error("{statement} has no line item '{label}'")]
    MissingLineItem {
        /// Expected row label
        label: &'static str,
        /// Statement that was searched
        statement: StatementKind,
    },

    /// The row exists but has no value for the period.
    #[error("{statement} line item '{label}' has no value for {period}")]
    MissingValue {
        /// Row label
        label: &'static str,
        /// Statement that was searched
        statement: StatementKind,
        /// Period that was read
        period: chrono::NaiveDate,
    },

    /// A statement has no column for the period being analyzed.
    #[error("{statement} has no column for period {period}")]
    MissingPeriod {
        /// Statement that was searched
        statement: StatementKind,
        /// The missing period, if any period was known
        period: String,
    },

    /// A ratio's denominator is zero.
    #[error("Division by zero computing {ratio}")]
    DivisionByZero {
        /// Display name of the ratio
        ratio: &'static str,
    },
}
