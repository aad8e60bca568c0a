//! Report generation for finlens ratio analyses.

use chrono::{DateTime, NaiveDate, Utc};
use finlens_data::StatementFrequency;
use finlens_ratios::RatioResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required field was never set on the builder.
    #[error("Report is missing required field: {0}")]
    MissingField(&'static str),
}

/// One ratio line of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRatio {
    /// Metric name, e.g. "Current Ratio".
    pub metric: String,

    /// Computed value.
    pub value: f64,
}

/// A ratio analysis report for one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Ticker symbol.
    pub symbol: String,

    /// Company short name, when known.
    pub company: Option<String>,

    /// Statement frequency the ratios were computed from.
    pub frequency: StatementFrequency,

    /// Reporting period the ratios describe.
    pub period: NaiveDate,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Ratios in display order.
    pub ratios: Vec<ReportRatio>,
}

impl Report {
    /// Create a new report from computed ratios.
    pub fn new(
        symbol: String,
        company: Option<String>,
        frequency: StatementFrequency,
        ratios: &RatioResult,
    ) -> Self {
        Self {
            symbol,
            company,
            frequency,
            period: ratios.period(),
            timestamp: Utc::now(),
            ratios: ratios
                .pairs()
                .map(|(metric, value)| ReportRatio {
                    metric: metric.to_string(),
                    value,
                })
                .collect(),
        }
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    symbol: Option<String>,
    company: Option<String>,
    frequency: StatementFrequency,
    ratios: Option<RatioResult>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the company name.
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the statement frequency.
    pub const fn frequency(mut self, frequency: StatementFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the computed ratios.
    pub fn ratios(mut self, ratios: RatioResult) -> Self {
        self.ratios = Some(ratios);
        self
    }

    /// Build the report.
    pub fn build(self) -> Result<Report, ReportError> {
        let symbol = self.symbol.ok_or(ReportError::MissingField("symbol"))?;
        let ratios = self.ratios.ok_or(ReportError::MissingField("ratios"))?;
        Ok(Report::new(symbol, self.company, self.frequency, &ratios))
    }
}
