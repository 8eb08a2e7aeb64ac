//! Candle — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV candle for a single asset.
///
/// Prices are quoted in USD. Volume is kept as `f64` because several
/// upstream APIs report fractional base-currency volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Basic OHLCV sanity check: positive prices, `low <= open,close <= high`,
    /// non-negative volume.
    pub fn is_sane(&self) -> bool {
        self.open > 0.0
            && self.high > 0.0
            && self.low > 0.0
            && self.close > 0.0
            && self.high >= self.low
            && self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
            && self.volume >= 0.0
            && self.volume.is_finite()
    }

    /// Day-over-day close change in percent against a previous close.
    ///
    /// Returns 0.0 when the previous close is zero so callers never divide
    /// by zero on degenerate input.
    pub fn change_pct(&self, previous_close: f64) -> f64 {
        if previous_close == 0.0 {
            return 0.0;
        }
        (self.close - previous_close) / previous_close * 100.0
    }
}

/// Ordered sequence of daily candles, ascending by date, one per calendar day.
///
/// The invariant is established by `data::canonicalize` for provider data and
/// by construction for synthetic data; it is not re-checked on every access.
pub type PriceSeries = Vec<Candle>;
