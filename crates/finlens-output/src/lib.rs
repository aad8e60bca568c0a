#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod export;
pub mod report;
pub mod table;

pub use chart::{ChartConfig, render_bar_chart};
pub use export::{ExportError, ExportFormat, Exporter, RatioExport, StatementExport};
pub use report::{Report, ReportBuilder, ReportError, ReportRatio};
pub use table::{format_thousands, render_ratio_table, render_statement_table};
