//! Yahoo Finance data providers.

pub mod keys;
pub mod profile;
pub mod provider;
pub mod timeseries;

pub use profile::YahooProfileProvider;
pub use provider::YahooFinancialsProvider;
pub use timeseries::{DEFAULT_BASE_URL, TimeseriesClient, YahooConfig, parse_timeseries};
