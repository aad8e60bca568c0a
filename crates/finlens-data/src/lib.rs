#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod financials;
pub mod memory;
pub mod statement;
pub mod yahoo;

pub use error::{DataError, Result};
pub use financials::{Financials, FinancialsSource, Ticker};
pub use memory::InMemorySource;
pub use statement::{LineItemRow, StatementFrequency, StatementKind, StatementTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
