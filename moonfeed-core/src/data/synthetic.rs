//! Synthetic series generator — the unconditional last resort.
//!
//! Produces a plausible daily OHLCV series from a bounded multiplicative
//! random walk anchored at the asset's baseline price. This path must never
//! fail: any step that would break the candle invariant clamps instead.

use crate::config::SyntheticConfig;
use crate::domain::{Asset, Candle, PriceSeries};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Generator for demo data when every live provider is exhausted.
#[derive(Debug, Clone, Default)]
pub struct SyntheticGenerator {
    config: SyntheticConfig,
}

impl SyntheticGenerator {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    /// Generate `min(limit, max_points)` daily candles ending today.
    pub fn generate(&self, asset: Asset, limit: usize) -> PriceSeries {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(asset, limit, &mut rng)
    }

    /// Same walk with a caller-provided RNG, for reproducible tests.
    ///
    /// Timestamps are contiguous calendar days (no gaps), strictly
    /// ascending, with the last point on today's date.
    pub fn generate_with_rng<R: Rng>(&self, asset: Asset, limit: usize, rng: &mut R) -> PriceSeries {
        let count = limit.min(self.config.max_points);
        if count == 0 {
            return Vec::new();
        }
        let end = chrono::Local::now().date_naive();
        self.walk(asset, count, end, rng)
    }

    fn walk<R: Rng>(&self, asset: Asset, count: usize, end: NaiveDate, rng: &mut R) -> PriceSeries {
        let move_bound = self.config.max_daily_move.abs();
        let wick_bound = self.config.max_wick.abs();
        let start = end - Duration::days(count as i64 - 1);

        let mut candles = Vec::with_capacity(count);
        let mut prev_close = asset.baseline_price();

        for offset in 0..count {
            let date = start + Duration::days(offset as i64);

            let daily_move = rng.gen_range(-move_bound..=move_bound);
            let close = (prev_close * (1.0 + daily_move)).max(f64::MIN_POSITIVE);
            let open = prev_close;

            let body_high = open.max(close);
            let body_low = open.min(close);
            let mut high = body_high * (1.0 + rng.gen_range(0.0..=wick_bound));
            let mut low = body_low * (1.0 - rng.gen_range(0.0..=wick_bound));

            // Clamp so the invariant low <= open,close <= high always holds.
            high = high.max(body_high);
            low = low.min(body_low).max(f64::MIN_POSITIVE);

            let volume = (self.config.baseline_volume * rng.gen_range(0.5..=2.0)).max(0.0);

            candles.push(Candle {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
            prev_close = close;
        }

        candles
    }
}
