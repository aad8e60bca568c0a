//! Yahoo Finance implementation of [`FinancialsSource`].

use super::profile::YahooProfileProvider;
use super::timeseries::{TimeseriesClient, YahooConfig};
use crate::error::Result;
use crate::financials::{FinancialsSource, Ticker};
use crate::statement::{StatementFrequency, StatementKind, StatementTable};
use async_trait::async_trait;

/// Company identity from the quote summary, statements from the
/// fundamentals timeseries.
#[derive(Debug)]
pub struct YahooFinancialsProvider {
    profile: YahooProfileProvider,
    timeseries: TimeseriesClient,
}

impl YahooFinancialsProvider {
    /// Create a provider with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a provider with a custom configuration.
    pub fn with_config(config: YahooConfig) -> Result<Self> {
        Ok(Self {
            profile: YahooProfileProvider::with_config(&config)?,
            timeseries: TimeseriesClient::with_config(config)?,
        })
    }

    /// The company identity lookup.
    pub const fn profile(&self) -> &YahooProfileProvider {
        &self.profile
    }
}

#[async_trait]
impl FinancialsSource for YahooFinancialsProvider {
    async fn company_name(&self, ticker: &Ticker) -> Result<Option<String>> {
        self.profile.short_name(ticker).await
    }

    async fn fetch_statement(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
        frequency: StatementFrequency,
    ) -> Result<StatementTable> {
        self.timeseries.fetch_statement(ticker, kind, frequency).await
    }
}
