//! Property-based invariant coverage for generated and canonicalized series.

use chrono::Duration;
use moonfeed_core::config::SyntheticConfig;
use moonfeed_core::data::{canonicalize, SyntheticGenerator};
use moonfeed_core::domain::{Asset, Candle};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn any_asset() -> impl Strategy<Value = Asset> {
    prop_oneof![
        Just(Asset::Bitcoin),
        Just(Asset::Ethereum),
        Just(Asset::Solana),
    ]
}

proptest! {
    /// Every generated candle satisfies the OHLCV invariant, for any
    /// asset, limit, and seed.
    #[test]
    fn generated_candles_hold_invariant(
        asset in any_asset(),
        limit in 1usize..400,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let series = SyntheticGenerator::default().generate_with_rng(asset, limit, &mut rng);

        prop_assert_eq!(series.len(), limit.min(365));
        for candle in &series {
            prop_assert!(candle.low <= candle.open && candle.open <= candle.high);
            prop_assert!(candle.low <= candle.close && candle.close <= candle.high);
            prop_assert!(candle.volume >= 0.0);
        }
    }

    /// Generated timestamps are strictly ascending contiguous calendar
    /// days — no duplicates, no gaps.
    #[test]
    fn generated_dates_are_contiguous(
        asset in any_asset(),
        limit in 2usize..400,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let series = SyntheticGenerator::default().generate_with_rng(asset, limit, &mut rng);

        for window in series.windows(2) {
            prop_assert_eq!(window[1].date - window[0].date, Duration::days(1));
        }
    }

    /// The walk bound really bounds each daily move.
    #[test]
    fn daily_moves_stay_within_bound(
        limit in 2usize..200,
        seed in any::<u64>(),
    ) {
        let config = SyntheticConfig::default();
        let bound = config.max_daily_move;
        let mut rng = StdRng::seed_from_u64(seed);
        let series = SyntheticGenerator::new(config).generate_with_rng(Asset::Bitcoin, limit, &mut rng);

        for window in series.windows(2) {
            let step = (window[1].close - window[0].close).abs() / window[0].close;
            prop_assert!(step <= bound + 1e-9);
        }
    }

    /// Canonicalization always yields a sorted, duplicate-free series no
    /// longer than the limit, whatever the input order.
    #[test]
    fn canonicalize_output_is_well_formed(
        closes in prop::collection::vec(100.0f64..100_000.0, 0..50),
        limit in 1usize..40,
    ) {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        // Deliberately aliased dates: every third candle repeats a day.
        let raw: Vec<Candle> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                date: start + Duration::days((i % ((closes.len() / 3).max(1))) as i64),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1_000.0,
            })
            .collect();

        let series = canonicalize(raw, Asset::Bitcoin, limit);

        prop_assert!(series.len() <= limit);
        for window in series.windows(2) {
            prop_assert!(window[0].date < window[1].date);
        }
        for candle in &series {
            prop_assert!(candle.is_sane());
        }
    }
}
