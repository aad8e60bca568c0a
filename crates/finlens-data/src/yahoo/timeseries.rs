//! Financial statements from the Yahoo Finance fundamentals timeseries.
//!
//! One request per statement asks for every line-item key of that statement;
//! the response holds one series per key with a data point per period.

use super::keys::{key_to_label, statement_keys};
use crate::error::{DataError, Result};
use crate::financials::Ticker;
use crate::statement::{StatementFrequency, StatementKind, StatementTable};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Yahoo Finance query host.
pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Path of the fundamentals timeseries endpoint.
const TIMESERIES_PATH: &str = "/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Browser-like user agent; Yahoo rejects unidentified clients.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Configuration for Yahoo Finance requests.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL of the query host (override for testing)
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Earliest period to request
    pub period_start: NaiveDate,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            period_start: NaiveDate::from_ymd_opt(2016, 12, 31).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesBody,
}

#[derive(Debug, Deserialize)]
struct TimeseriesBody {
    #[serde(default)]
    result: Vec<SeriesResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesResult {
    meta: SeriesMeta,
    #[serde(flatten)]
    series: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesMeta {
    #[serde(rename = "type", default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataPoint {
    as_of_date: NaiveDate,
    #[serde(default)]
    reported_value: Option<ReportedValue>,
}

#[derive(Debug, Deserialize)]
struct ReportedValue {
    #[serde(default)]
    raw: Option<f64>,
}

/// Decode a timeseries response body into a statement table.
///
/// Series for keys that are not part of the statement are ignored; keys with
/// no data points produce no row.
pub fn parse_timeseries(
    kind: StatementKind,
    frequency: StatementFrequency,
    body: &str,
) -> Result<StatementTable> {
    let response: TimeseriesResponse = serde_json::from_str(body)?;

    if let Some(err) = response.timeseries.error.filter(|e| !e.is_null()) {
        return Err(DataError::YahooApi(err.to_string()));
    }

    let keys = statement_keys(kind);
    let mut by_key: HashMap<&str, Vec<(NaiveDate, Option<f64>)>> = HashMap::new();

    for result in response.timeseries.result {
        let Some(type_name) = result.meta.types.first() else {
            continue;
        };
        let Some(key) = type_name.strip_prefix(frequency.prefix()) else {
            continue;
        };
        let Some(&key) = keys.iter().find(|k| **k == key) else {
            debug!(series = %type_name, "ignoring unrequested series");
            continue;
        };
        let Some(points) = result.series.get(type_name.as_str()) else {
            continue;
        };

        let points: Vec<Option<DataPoint>> = serde_json::from_value(points.clone())?;
        let entry = by_key.entry(key).or_default();
        for point in points.into_iter().flatten() {
            let value = point.reported_value.and_then(|v| v.raw);
            entry.push((point.as_of_date, value));
        }
    }

    let observations = keys.iter().flat_map(|key| {
        by_key
            .remove(key)
            .unwrap_or_default()
            .into_iter()
            .map(move |(date, value)| (key_to_label(key), date, value))
    });

    Ok(StatementTable::from_observations(kind, observations))
}

/// Client for the fundamentals timeseries endpoint.
#[derive(Debug)]
pub struct TimeseriesClient {
    client: reqwest::Client,
    config: YahooConfig,
}

impl TimeseriesClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(config: YahooConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self { client, config })
    }

    /// The active configuration.
    pub const fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// Fetch one statement for a ticker.
    ///
    /// # Errors
    /// Returns `DataError::Http` on a non-success status, `DataError::YahooApi`
    /// if Yahoo reports an error in the body, and `DataError::Serialization` if
    /// the body cannot be decoded.
    #[instrument(skip(self, ticker), fields(ticker = %ticker))]
    pub async fn fetch_statement(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
        frequency: StatementFrequency,
    ) -> Result<StatementTable> {
        let types = statement_keys(kind)
            .iter()
            .map(|key| format!("{}{}", frequency.prefix(), key))
            .collect::<Vec<_>>()
            .join(",");

        let period1 = self
            .config
            .period_start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();
        let period2 = Utc::now().timestamp();

        let url = format!(
            "{}{}/{}",
            self.config.base_url,
            TIMESERIES_PATH,
            ticker.as_str()
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", ticker.as_str().to_string()),
                ("type", types),
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
            ])
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "timeseries request failed");
            return Err(DataError::Http(format!(
                "Failed to fetch {} for {}: HTTP {}",
                kind,
                ticker,
                response.status()
            )));
        }

        let body = response.text().await.map_err(DataError::Network)?;
        let table = parse_timeseries(kind, frequency, &body)?;

        debug!(
            rows = table.len(),
            periods = table.periods().len(),
            "decoded statement"
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BODY: &str = r#"{
        "timeseries": {
            "result": [
                {
                    "meta": {"symbol": ["ACME"], "type": ["annualNetIncome"]},
                    "timestamp": [1672444800, 1703980800],
                    "annualNetIncome": [
                        {"asOfDate": "2022-12-31", "periodType": "12M", "currencyCode": "USD",
                         "reportedValue": {"raw": 90.0, "fmt": "90"}},
                        {"asOfDate": "2023-12-31", "periodType": "12M", "currencyCode": "USD",
                         "reportedValue": {"raw": 100.0, "fmt": "100"}}
                    ]
                },
                {
                    "meta": {"symbol": ["ACME"], "type": ["annualTotalRevenue"]},
                    "timestamp": [1672444800, 1703980800],
                    "annualTotalRevenue": [
                        null,
                        {"asOfDate": "2023-12-31", "periodType": "12M", "currencyCode": "USD",
                         "reportedValue": {"raw": 1000.0, "fmt": "1k"}}
                    ]
                },
                {
                    "meta": {"symbol": ["ACME"], "type": ["annualGrossProfit"]}
                },
                {
                    "meta": {"symbol": ["ACME"], "type": ["annualSomethingElse"]},
                    "annualSomethingElse": [
                        {"asOfDate": "2023-12-31", "reportedValue": {"raw": 1.0}}
                    ]
                }
            ],
            "error": null
        }
    }"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_timeseries() {
        let table = parse_timeseries(
            StatementKind::IncomeStatement,
            StatementFrequency::Annual,
            BODY,
        )
        .unwrap();

        assert_eq!(table.kind(), StatementKind::IncomeStatement);
        assert_eq!(table.periods(), &[date(2023, 12, 31), date(2022, 12, 31)]);

        // rows follow key order, not response order
        let labels: Vec<&str> = table.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Total Revenue", "Net Income"]);

        let revenue = table.row("Total Revenue").unwrap();
        assert_eq!(revenue.values[1], None);
        assert_relative_eq!(revenue.values[0].unwrap(), 1000.0);

        let net_income = table.row("Net Income").unwrap();
        assert_relative_eq!(net_income.values[0].unwrap(), 100.0);
        assert_relative_eq!(net_income.values[1].unwrap(), 90.0);
    }

    #[test]
    fn test_parse_ignores_other_frequency() {
        let table = parse_timeseries(
            StatementKind::IncomeStatement,
            StatementFrequency::Quarterly,
            BODY,
        )
        .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_reports_yahoo_error() {
        let body = r#"{"timeseries": {"result": [], "error": {"code": "Bad Request", "description": "Invalid type"}}}"#;
        let result = parse_timeseries(
            StatementKind::BalanceSheet,
            StatementFrequency::Annual,
            body,
        );
        assert!(matches!(result, Err(DataError::YahooApi(_))));
    }

    #[test]
    fn test_parse_malformed_body() {
        let result = parse_timeseries(
            StatementKind::BalanceSheet,
            StatementFrequency::Annual,
            "<html>",
        );
        assert!(matches!(result, Err(DataError::Serialization(_))));
    }

    #[test]
    fn test_default_config() {
        let config = YahooConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.period_start, date(2016, 12, 31));
    }
}
