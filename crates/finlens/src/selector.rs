//! Statement selection for the view mode.

use crate::error::{DashboardError, Result};
use finlens_data::{Financials, StatementKind, StatementTable};

/// Display width hint for a statement table.
pub const DISPLAY_WIDTH: u32 = 2000;

/// Display height hint for a statement table.
pub const DISPLAY_HEIGHT: u32 = 600;

/// A statement chosen for display, exactly as fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementView {
    /// The selected table
    pub table: StatementTable,
    /// Display width hint
    pub width: u32,
    /// Display height hint
    pub height: u32,
}

impl StatementView {
    /// Wrap a table with the default display size.
    pub const fn new(table: StatementTable) -> Self {
        Self {
            table,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        }
    }

    /// Which statement is shown.
    pub const fn kind(&self) -> StatementKind {
        self.table.kind()
    }
}

/// Select a statement by document name.
///
/// Names are "Balance Sheet", "Income Statement" and "Cash Flow Statement".
///
/// # Errors
/// Returns `DashboardError::UnknownDocument` for any other name.
pub fn select_statement(financials: &Financials, document: &str) -> Result<StatementView> {
    let kind = StatementKind::from_name(document)
        .ok_or_else(|| DashboardError::UnknownDocument(document.to_string()))?;
    Ok(StatementView::new(financials.statement(kind).clone()))
}
