//! CoinGecko data provider — the primary tier.
//!
//! Fetches daily price history from the free `market_chart` endpoint. The
//! free tier only carries close prices, so open/high/low are derived from
//! close by small fixed offsets; volume comes from the parallel
//! `total_volumes` series when present.

use super::http;
use super::provider::{PriceProvider, ProviderError};
use crate::config::FeedConfig;
use crate::domain::{Asset, Candle, PriceSeries};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Fallback when the volume series is missing or misaligned.
const DEFAULT_VOLUME: f64 = 1_000_000.0;

/// CoinGecko free tier serves at most one year of daily history.
const MAX_DAYS: usize = 365;

/// `market_chart` response: parallel `[timestamp_ms, value]` arrays.
#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<(f64, f64)>,
    #[serde(default)]
    total_volumes: Vec<(f64, f64)>,
}

pub struct CoinGeckoProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http::build_client(timeout),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.coingecko_base_url.clone(), config.http_timeout())
    }

    fn chart_url(&self, asset: Asset, limit: usize) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}&interval=daily",
            self.base_url,
            asset.coingecko_id(),
            limit.min(MAX_DAYS),
        )
    }

    fn parse_chart(chart: MarketChart, limit: usize) -> Result<Vec<Candle>, ProviderError> {
        if chart.prices.is_empty() {
            return Err(ProviderError::Malformed("no price data in response".into()));
        }

        // prices and total_volumes are parallel series; zip only when the
        // cadence matches, otherwise fall back to the default volume.
        let volumes_aligned = chart.total_volumes.len() == chart.prices.len();

        let skip = chart.prices.len().saturating_sub(limit);
        let mut candles = Vec::with_capacity(chart.prices.len() - skip);

        for (i, &(ts_ms, price)) in chart.prices.iter().enumerate().skip(skip) {
            let date = http::date_from_millis(ts_ms as i64)?;
            let volume = if volumes_aligned {
                chart.total_volumes[i].1
            } else {
                DEFAULT_VOLUME
            };

            // Close-only feed: approximate the rest of the bar around it.
            candles.push(Candle {
                date,
                open: price * 0.999,
                high: price * 1.001,
                low: price * 0.998,
                close: price,
                volume,
            });
        }

        Ok(candles)
    }
}

impl PriceProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn try_fetch(&self, asset: Asset, limit: usize) -> Result<PriceSeries, ProviderError> {
        let url = self.chart_url(asset, limit);
        debug!(provider = self.name(), %asset, limit, "requesting market chart");

        let resp = self.client.get(&url).send().map_err(http::transport_error)?;
        http::check_status(&resp)?;

        let chart: MarketChart = resp
            .json()
            .map_err(|e| ProviderError::Malformed(format!("chart decode failed: {e}")))?;

        Self::parse_chart(chart, limit)
    }
}
