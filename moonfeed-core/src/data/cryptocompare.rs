//! CryptoCompare data provider — second backup tier.
//!
//! Fetches daily bars from the `histoday` endpoint, which returns full
//! OHLCV oldest-first inside a nested `Data.Data` array.

use super::http;
use super::provider::{PriceProvider, ProviderError};
use crate::config::FeedConfig;
use crate::domain::{Asset, Candle, PriceSeries};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// CryptoCompare's ceiling for bars per request.
const MAX_LIMIT: usize = 2_000;

#[derive(Debug, Deserialize)]
struct HistoResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Data", default)]
    data: HistoData,
}

#[derive(Debug, Default, Deserialize)]
struct HistoData {
    #[serde(rename = "Data", default)]
    data: Vec<HistoBar>,
}

#[derive(Debug, Deserialize)]
struct HistoBar {
    /// Unix timestamp in seconds.
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volumefrom: f64,
}

pub struct CryptoCompareProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CryptoCompareProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http::build_client(timeout),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.cryptocompare_base_url.clone(), config.http_timeout())
    }

    fn histoday_url(&self, asset: Asset, limit: usize) -> String {
        // The limit parameter counts bars beyond the first, so `limit` bars
        // need `limit - 1`.
        format!(
            "{}/data/v2/histoday?fsym={}&tsym=USD&limit={}",
            self.base_url,
            asset.ticker(),
            limit.clamp(1, MAX_LIMIT) - 1,
        )
    }

    fn parse_histoday(resp: HistoResponse) -> Result<Vec<Candle>, ProviderError> {
        if resp.response.eq_ignore_ascii_case("error") {
            return Err(ProviderError::Malformed(format!(
                "API error: {}",
                resp.message
            )));
        }

        if resp.data.data.is_empty() {
            return Err(ProviderError::Malformed("no bars in response".into()));
        }

        let mut candles = Vec::with_capacity(resp.data.data.len());
        for bar in resp.data.data {
            candles.push(Candle {
                date: http::date_from_millis(bar.time * 1_000)?,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volumefrom,
            });
        }

        Ok(candles)
    }
}

impl PriceProvider for CryptoCompareProvider {
    fn name(&self) -> &str {
        "cryptocompare"
    }

    fn try_fetch(&self, asset: Asset, limit: usize) -> Result<PriceSeries, ProviderError> {
        let url = self.histoday_url(asset, limit);
        debug!(provider = self.name(), %asset, limit, "requesting histoday");

        let resp = self.client.get(&url).send().map_err(http::transport_error)?;
        http::check_status(&resp)?;

        let histo: HistoResponse = resp
            .json()
            .map_err(|e| ProviderError::Malformed(format!("histoday decode failed: {e}")))?;

        Self::parse_histoday(histo)
    }
}
