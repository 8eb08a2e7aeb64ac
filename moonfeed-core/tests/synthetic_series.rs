//! Contract tests for the synthetic generator through its public API.

use moonfeed_core::data::SyntheticGenerator;
use moonfeed_core::domain::Asset;

#[test]
fn two_runs_share_structure_but_not_values() {
    let generator = SyntheticGenerator::default();

    let first = generator.generate(Asset::Bitcoin, 10);
    let second = generator.generate(Asset::Bitcoin, 10);

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 10);

    // Identical timestamp range...
    let first_dates: Vec<_> = first.iter().map(|c| c.date).collect();
    let second_dates: Vec<_> = second.iter().map(|c| c.date).collect();
    assert_eq!(first_dates, second_dates);

    // ...but different prices, with overwhelming probability.
    let first_closes: Vec<_> = first.iter().map(|c| c.close).collect();
    let second_closes: Vec<_> = second.iter().map(|c| c.close).collect();
    assert_ne!(first_closes, second_closes);
}

#[test]
fn oversized_limit_is_capped_at_a_year() {
    let generator = SyntheticGenerator::default();
    assert_eq!(generator.generate(Asset::Bitcoin, 1_000).len(), 365);
}

#[test]
fn every_asset_generates_near_its_baseline() {
    let generator = SyntheticGenerator::default();
    for asset in Asset::ALL {
        let series = generator.generate(asset, 30);
        let baseline = asset.baseline_price();
        // 30 steps of at most ±5% stay well inside a 5x band.
        for candle in &series {
            assert!(candle.close > baseline / 5.0);
            assert!(candle.close < baseline * 5.0);
        }
    }
}

#[test]
fn generated_series_ends_today() {
    let generator = SyntheticGenerator::default();
    let series = generator.generate(Asset::Solana, 14);
    assert_eq!(
        series.last().unwrap().date,
        chrono::Local::now().date_naive()
    );
}
