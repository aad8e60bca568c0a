#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dashboard;
pub mod error;
pub mod selector;

// Re-export main types from sub-crates
pub use finlens_data as data;
pub use finlens_output as output;
pub use finlens_ratios as ratios;

pub use dashboard::{Action, ActionOutput, Dashboard, run_action, validate_ticker};
pub use error::{DashboardError, Result};
pub use selector::{DISPLAY_HEIGHT, DISPLAY_WIDTH, StatementView, select_statement};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
