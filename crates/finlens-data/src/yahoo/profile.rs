//! Company identity lookup from the Yahoo quote summary.

use super::timeseries::YahooConfig;
use crate::error::{DataError, Result};
use crate::financials::Ticker;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use yahoo_finance_api::{self as yahoo, YQuoteSummary, YahooError};

/// Quote summary error code for an unknown symbol.
const NOT_FOUND_CODE: &str = "Not Found";

/// Resolves tickers to company short names.
pub struct YahooProfileProvider {
    connector: Mutex<yahoo::YahooConnector>,
    timeout: Duration,
}

impl std::fmt::Debug for YahooProfileProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooProfileProvider")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl YahooProfileProvider {
    /// Create a new profile provider with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(&YahooConfig::default())
    }

    /// Create a profile provider using the configured request timeout.
    ///
    /// The connector keeps its own browser user agent; the quote summary
    /// endpoint rejects most others.
    pub fn with_config(config: &YahooConfig) -> Result<Self> {
        let connector = yahoo::YahooConnector::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            connector: Mutex::new(connector),
            timeout: config.timeout,
        })
    }

    /// Per-request timeout of the connector.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Look up the company short name for a ticker.
    ///
    /// Returns `Ok(None)` when Yahoo knows no company for the ticker.
    #[instrument(skip(self, ticker), fields(ticker = %ticker))]
    pub async fn short_name(&self, ticker: &Ticker) -> Result<Option<String>> {
        let summary = {
            let mut connector = self.connector.lock().await;
            connector.get_ticker_info(ticker.as_str()).await
        };

        match summary {
            Ok(summary) => short_name_from_summary(summary),
            Err(err) if is_not_found(&err) => {
                debug!(error = %err, "ticker not found");
                Ok(None)
            }
            Err(err) => Err(DataError::from(err)),
        }
    }
}

/// Whether a connector error means the symbol does not exist.
fn is_not_found(err: &YahooError) -> bool {
    match err {
        YahooError::NoResult | YahooError::NoQuotes => true,
        YahooError::ApiError(msg) => msg.code.as_deref() == Some(NOT_FOUND_CODE),
        _ => false,
    }
}

/// Pull the short name out of a quote summary.
///
/// An unknown symbol comes back as a successful response carrying a
/// "Not Found" error and no result.
fn short_name_from_summary(summary: YQuoteSummary) -> Result<Option<String>> {
    let Some(quote_summary) = summary.quote_summary else {
        return Ok(None);
    };

    if let Some(error) = quote_summary.error {
        if error.code.as_deref() == Some(NOT_FOUND_CODE) {
            debug!(description = ?error.description, "ticker not found");
            return Ok(None);
        }
        return Err(DataError::YahooApi(format!(
            "quote summary error {}: {}",
            error.code.as_deref().unwrap_or("unknown"),
            error.description.as_deref().unwrap_or("no description")
        )));
    }

    let short_name = quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .and_then(|data| data.quote_type)
        .and_then(|qt| qt.short_name)
        .filter(|name| !name.trim().is_empty());

    Ok(short_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FOUND: &str = r#"{
        "quoteSummary": {
            "result": [{
                "quoteType": {
                    "exchange": "NMS",
                    "quoteType": "EQUITY",
                    "symbol": "AAPL",
                    "shortName": "Apple Inc.",
                    "longName": "Apple Inc."
                }
            }],
            "error": null
        }
    }"#;

    const NOT_FOUND: &str = r#"{
        "quoteSummary": {
            "result": null,
            "error": {
                "code": "Not Found",
                "description": "Quote not found for symbol: ZZZZ"
            }
        }
    }"#;

    fn summary(json: &str) -> YQuoteSummary {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_short_name_found() {
        assert_eq!(
            short_name_from_summary(summary(FOUND)).unwrap(),
            Some("Apple Inc.".to_string())
        );
    }

    #[test]
    fn test_unknown_symbol_is_none() {
        assert_eq!(short_name_from_summary(summary(NOT_FOUND)).unwrap(), None);
    }

    #[rstest]
    #[case(r#"{"quoteSummary":{"result":[],"error":null}}"#)]
    #[case(r#"{"quoteSummary":{"result":[{"quoteType":{"symbol":"XYZ","shortName":"  "}}],"error":null}}"#)]
    #[case(r#"{"finance":{"result":null,"error":null}}"#)]
    fn test_missing_short_name_is_none(#[case] json: &str) {
        assert_eq!(short_name_from_summary(summary(json)).unwrap(), None);
    }

    #[test]
    fn test_other_summary_error_propagates() {
        let json = r#"{"quoteSummary":{"result":null,"error":{"code":"Bad Request","description":"Invalid modules"}}}"#;

        let err = short_name_from_summary(summary(json)).unwrap_err();
        assert!(matches!(err, DataError::YahooApi(msg) if msg.contains("Bad Request")));
    }

    #[rstest]
    #[case(YahooError::NoResult, true)]
    #[case(YahooError::NoQuotes, true)]
    #[case(YahooError::TooManyRequests("slow down".to_string()), false)]
    #[case(YahooError::FetchFailed("404 page".to_string()), false)]
    #[case(YahooError::Unauthorized, false)]
    fn test_is_not_found(#[case] err: YahooError, #[case] expected: bool) {
        assert_eq!(is_not_found(&err), expected);
    }

    #[test]
    fn test_api_error_not_found() {
        let not_found = summary(NOT_FOUND)
            .quote_summary
            .and_then(|qs| qs.error)
            .unwrap();
        assert!(is_not_found(&YahooError::ApiError(not_found)));

        let json = r#"{"quoteSummary":{"result":null,"error":{"code":"Internal Error","description":"boom"}}}"#;
        let internal = summary(json).quote_summary.and_then(|qs| qs.error).unwrap();
        assert!(!is_not_found(&YahooError::ApiError(internal)));
    }

    #[test]
    fn test_with_config_keeps_timeout() {
        let config = YahooConfig {
            timeout: Duration::from_secs(7),
            ..YahooConfig::default()
        };

        let provider = YahooProfileProvider::with_config(&config).unwrap();
        assert_eq!(provider.timeout(), Duration::from_secs(7));
        assert_eq!(
            YahooProfileProvider::new().unwrap().timeout(),
            YahooConfig::default().timeout
        );
    }
}
