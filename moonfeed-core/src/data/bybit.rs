//! Bybit data provider — first backup tier.
//!
//! Fetches daily klines from the V5 public market API. Klines carry full
//! OHLCV and arrive newest-first as arrays of strings:
//! `[startTime, open, high, low, close, volume, turnover]`.

use super::http;
use super::provider::{PriceProvider, ProviderError};
use crate::config::FeedConfig;
use crate::domain::{Asset, Candle, PriceSeries};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Bybit's documented ceiling for a single kline request.
const MAX_LIMIT: usize = 1_000;

/// Bybit's "too many visits" rate-limit code.
const RET_CODE_RATE_LIMITED: i64 = 10_006;

#[derive(Debug, Deserialize)]
struct KlineResponse {
    #[serde(rename = "retCode")]
    ret_code: i64,
    #[serde(rename = "retMsg", default)]
    ret_msg: String,
    #[serde(default)]
    result: KlineResult,
}

#[derive(Debug, Default, Deserialize)]
struct KlineResult {
    #[serde(default)]
    list: Vec<Vec<String>>,
}

pub struct BybitProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BybitProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http::build_client(timeout),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.bybit_base_url.clone(), config.http_timeout())
    }

    fn kline_url(&self, asset: Asset, limit: usize) -> String {
        format!(
            "{}/v5/market/kline?category=linear&symbol={}&interval=D&limit={}",
            self.base_url,
            asset.symbol(),
            limit.min(MAX_LIMIT),
        )
    }

    fn parse_klines(resp: KlineResponse) -> Result<Vec<Candle>, ProviderError> {
        if resp.ret_code == RET_CODE_RATE_LIMITED {
            return Err(ProviderError::RateLimited { retry_after_secs: 60 });
        }
        if resp.ret_code != 0 {
            return Err(ProviderError::Malformed(format!(
                "API error {}: {}",
                resp.ret_code, resp.ret_msg
            )));
        }

        let mut candles = Vec::with_capacity(resp.result.list.len());
        for row in &resp.result.list {
            match Self::parse_row(row) {
                Ok(candle) => candles.push(candle),
                Err(e) => warn!("skipping unparseable kline row: {e}"),
            }
        }

        if candles.is_empty() {
            return Err(ProviderError::Malformed("no kline data in response".into()));
        }

        Ok(candles)
    }

    fn parse_row(row: &[String]) -> Result<Candle, ProviderError> {
        if row.len() < 6 {
            return Err(ProviderError::Malformed(format!(
                "kline row has {} fields, expected at least 6",
                row.len()
            )));
        }

        let field = |i: usize| -> Result<f64, ProviderError> {
            row[i]
                .parse::<f64>()
                .map_err(|_| ProviderError::Malformed(format!("non-numeric kline field: {}", row[i])))
        };

        let ts_ms = row[0]
            .parse::<i64>()
            .map_err(|_| ProviderError::Malformed(format!("bad kline timestamp: {}", row[0])))?;

        Ok(Candle {
            date: http::date_from_millis(ts_ms)?,
            open: field(1)?,
            high: field(2)?,
            low: field(3)?,
            close: field(4)?,
            volume: field(5)?,
        })
    }
}

impl PriceProvider for BybitProvider {
    fn name(&self) -> &str {
        "bybit"
    }

    fn try_fetch(&self, asset: Asset, limit: usize) -> Result<PriceSeries, ProviderError> {
        let url = self.kline_url(asset, limit);
        debug!(provider = self.name(), %asset, limit, "requesting klines");

        let resp = self.client.get(&url).send().map_err(http::transport_error)?;
        http::check_status(&resp)?;

        let klines: KlineResponse = resp
            .json()
            .map_err(|e| ProviderError::Malformed(format!("kline decode failed: {e}")))?;

        Self::parse_klines(klines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn response_from(json: &str) -> KlineResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_kline_rows() {
        let resp = response_from(
            r#"{
                "retCode": 0,
                "retMsg": "OK",
                "result": {
                    "category": "linear",
                    "symbol": "BTCUSDT",
                    "list": [
                        ["1704240000000", "44800", "45600", "44100", "45200", "12500.5", "5.6e8"],
                        ["1704153600000", "44100", "44900", "43800", "44800", "11000.0", "4.9e8"]
                    ]
                }
            }"#,
        );

        let candles = BybitProvider::parse_klines(resp).unwrap();
        assert_eq!(candles.len(), 2);
        // Newest-first wire order is preserved here; the selector sorts.
        assert_eq!(candles[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(candles[0].close, 45_200.0);
        assert_eq!(candles[0].volume, 12_500.5);
        assert!(candles[0].is_sane());
    }

    #[test]
    fn rate_limit_ret_code_maps_to_rate_limited() {
        let resp = response_from(r#"{"retCode": 10006, "retMsg": "too many visits"}"#);
        let err = BybitProvider::parse_klines(resp).unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited { .. }));
    }

    #[test]
    fn api_error_ret_code_is_malformed() {
        let resp = response_from(r#"{"retCode": 10001, "retMsg": "params error"}"#);
        let err = BybitProvider::parse_klines(resp).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn short_rows_are_skipped_not_fatal() {
        let resp = response_from(
            r#"{
                "retCode": 0,
                "retMsg": "OK",
                "result": {"list": [
                    ["1704240000000", "44800"],
                    ["1704153600000", "44100", "44900", "43800", "44800", "11000.0"]
                ]}
            }"#,
        );
        let candles = BybitProvider::parse_klines(resp).unwrap();
        assert_eq!(candles.len(), 1);
    }

    #[test]
    fn all_rows_unparseable_is_malformed() {
        let resp = response_from(
            r#"{"retCode": 0, "retMsg": "OK", "result": {"list": [["garbage"]]}}"#,
        );
        assert!(matches!(
            BybitProvider::parse_klines(resp).unwrap_err(),
            ProviderError::Malformed(_)
        ));
    }

    #[test]
    fn kline_url_uses_symbol_and_caps_limit() {
        let provider = BybitProvider::new("https://example.test", Duration::from_secs(1));
        let url = provider.kline_url(Asset::Ethereum, 5_000);
        assert!(url.contains("symbol=ETHUSDT"));
        assert!(url.contains("limit=1000"));
    }
}
