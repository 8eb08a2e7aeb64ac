//! Canonicalization of raw provider data: validate, dedup, sort, truncate.

use crate::domain::{Asset, Candle, PriceSeries};
use std::collections::HashSet;

/// Canonicalize raw candles from a provider into a well-formed series.
///
/// - drops candles failing the OHLCV sanity check or falling outside the
///   asset's plausible price band
/// - deduplicates by calendar date, keeping the first occurrence
/// - sorts ascending by date
/// - keeps only the trailing `limit` points
pub fn canonicalize(raw: Vec<Candle>, asset: Asset, limit: usize) -> PriceSeries {
    let (min_price, max_price) = asset.plausible_range();

    let mut seen = HashSet::new();
    let mut candles: Vec<Candle> = raw
        .into_iter()
        .filter(|c| c.is_sane())
        .filter(|c| {
            [c.open, c.high, c.low, c.close]
                .iter()
                .all(|p| (min_price..=max_price).contains(p))
        })
        .filter(|c| seen.insert(c.date))
        .collect();

    candles.sort_by_key(|c| c.date);

    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }

    candles
}
