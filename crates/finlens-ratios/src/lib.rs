#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod line_item;
pub mod ratio;
pub mod registry;

pub use error::{RatioError, Result};
pub use line_item::{LineItem, LineItemValues};
pub use ratio::{Ratio, RatioEntry, RatioResult, compute_ratios};
pub use registry::{
    RatioCategory, RatioInfo, available_ratios, count_by_category, get_ratio_info,
    ratios_by_category,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
