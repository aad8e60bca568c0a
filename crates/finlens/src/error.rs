//! Errors surfaced by dashboard actions.

use finlens_data::DataError;
use finlens_ratios::RatioError;
use thiserror::Error;

/// Result type for dashboard actions.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors surfaced by dashboard actions.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Fetching company data failed, including an unknown ticker.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The ratio calculation failed.
    #[error("Ratio calculation failed: {0}")]
    Ratio(#[from] RatioError),

    /// The requested statement document does not exist.
    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    /// The requested action does not exist.
    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

impl DashboardError {
    /// Whether the ticker resolved to no company.
    pub const fn is_invalid_ticker(&self) -> bool {
        matches!(self, Self::Data(DataError::InvalidTicker { .. }))
    }
}
