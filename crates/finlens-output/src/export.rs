//! Export of ratios, statements and reports.
//!
//! Ratios and statements are flattened to one record per value so the CSV and
//! JSON renditions carry the same fields.

use crate::report::Report;
use chrono::NaiveDate;
use finlens_data::{StatementFrequency, StatementTable};
use finlens_ratios::RatioResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// One ratio value for a company and period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatioExport {
    /// Ticker symbol.
    pub symbol: String,

    /// Reporting period of the statements.
    pub period: NaiveDate,

    /// Metric name.
    pub metric: String,

    /// Ratio value.
    pub value: f64,
}

impl RatioExport {
    /// Flatten a ratio result into export records, in display order.
    pub fn from_result(symbol: &str, ratios: &RatioResult) -> Vec<Self> {
        ratios
            .pairs()
            .map(|(metric, value)| Self {
                symbol: symbol.to_string(),
                period: ratios.period(),
                metric: metric.to_string(),
                value,
            })
            .collect()
    }
}

/// One statement cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementExport {
    /// Ticker symbol.
    pub symbol: String,

    /// Statement name, e.g. "Balance Sheet".
    pub statement: String,

    /// Statement frequency.
    pub frequency: StatementFrequency,

    /// Reporting period.
    pub period: NaiveDate,

    /// Line item label.
    pub line_item: String,

    /// Reported value, empty when nothing was reported.
    pub value: Option<f64>,
}

impl StatementExport {
    /// Flatten a statement table into export records, row by row with the
    /// most recent period first.
    pub fn from_table(
        symbol: &str,
        frequency: StatementFrequency,
        table: &StatementTable,
    ) -> Vec<Self> {
        table
            .rows()
            .iter()
            .flat_map(|row| {
                table
                    .periods()
                    .iter()
                    .zip(&row.values)
                    .map(move |(period, value)| Self {
                        symbol: symbol.to_string(),
                        statement: table.kind().name().to_string(),
                        frequency,
                        period: *period,
                        line_item: row.label.clone(),
                        value: *value,
                    })
            })
            .collect()
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn records_to_csv<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)?;
    Ok(data)
}

impl Exporter for Vec<RatioExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<StatementExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Report {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut output = String::new();

                // Write header information as comments
                output.push_str(&format!("# Symbol: {}\n", self.symbol));
                if let Some(company) = &self.company {
                    output.push_str(&format!("# Company: {}\n", company));
                }
                output.push_str(&format!("# Frequency: {}\n", self.frequency));
                output.push_str(&format!("# Period: {}\n", self.period));

                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.write_record(["metric", "value"])?;
                for ratio in &self.ratios {
                    let value = format!("{:.2}", ratio.value);
                    wtr.write_record([ratio.metric.as_str(), value.as_str()])?;
                }
                let ratio_data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)?;
                output.push_str(&ratio_data);
                Ok(output)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
