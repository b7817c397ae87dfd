//! tests/scoring_tests.rs
//!
//! Batch-level scoring properties: the hand-computed regression fixture,
//! score bounds, monotonicity in liquidations, and the degenerate
//! population case.

use proptest::prelude::*;

use wallet_risk_scorer::scoring::{
    Normalizer, ScoreAggregator, ScoringWeights, WalletFeatureRecord,
};

fn record(
    wallet: &str,
    interactions: u64,
    age: f64,
    recency: f64,
    liquidations: u64,
    health: f64,
) -> WalletFeatureRecord {
    WalletFeatureRecord {
        wallet: wallet.to_string(),
        interaction_count: interactions,
        wallet_age_days: age,
        days_since_last_tx: recency,
        liquidation_count: liquidations,
        health_factor_proxy: health,
    }
}

fn score_batch(batch: &[WalletFeatureRecord]) -> Vec<u32> {
    let aggregator = ScoreAggregator::new(ScoringWeights::default()).unwrap();
    Normalizer::normalize(batch).iter().map(|r| aggregator.score(r).score).collect()
}

/// Regression fixture with hand-computed expected values.
///
/// A is an established active wallet, B is older but stale and was
/// liquidated once, C is the sentinel record of a wallet with no
/// protocol history.
#[test]
fn test_three_wallet_regression_fixture() {
    let batch = vec![
        record("0xaaa", 10, 100.0, 5.0, 0, 1.6),
        record("0xbbb", 200, 500.0, 400.0, 1, 2.2),
        record("0xccc", 0, 0.0, 9999.0, 0, 1.0),
    ];
    let scores = score_batch(&batch);
    assert_eq!(scores, vec![742, 594, 400]);
    // Strict ordering: the active wallet beats the liquidated one, which
    // beats the no-history sentinel.
    assert!(scores[0] > scores[1]);
    assert!(scores[1] > scores[2]);
}

#[test]
fn test_degenerate_population_scores_1000() {
    let batch = vec![
        record("0xaaa", 10, 100.0, 5.0, 0, 1.6),
        record("0xbbb", 10, 100.0, 5.0, 0, 1.6),
        record("0xccc", 10, 100.0, 5.0, 0, 1.6),
    ];
    assert_eq!(score_batch(&batch), vec![1000, 1000, 1000]);
}

#[test]
fn test_identical_records_receive_identical_scores() {
    let batch = vec![
        record("0xaaa", 10, 100.0, 5.0, 0, 1.6),
        record("0xbbb", 200, 500.0, 400.0, 1, 2.2),
        record("0xccc", 200, 500.0, 400.0, 1, 2.2),
    ];
    let scores = score_batch(&batch);
    assert_eq!(scores[1], scores[2]);
}

#[test]
fn test_more_liquidations_never_raise_the_score() {
    let mut previous = u32::MAX;
    for liquidations in [0, 1, 2, 5, 20] {
        let batch = vec![
            record("0xaaa", 10, 100.0, 5.0, 0, 1.6),
            record("0xbbb", 200, 500.0, 400.0, liquidations, 2.2),
            record("0xccc", 0, 0.0, 9999.0, 0, 1.0),
        ];
        let scores = score_batch(&batch);
        assert!(scores[1] <= previous, "liquidations={liquidations} raised the score");
        previous = scores[1];
    }
}

#[test]
fn test_sentinel_equals_explicit_sentinel_record() {
    let sentinel = WalletFeatureRecord::sentinel("0xCCC");
    assert_eq!(sentinel.wallet, "0xccc");
    let explicit = record("0xccc", 0, 0.0, 9999.0, 0, 1.0);

    let batch_a = vec![record("0xaaa", 10, 100.0, 5.0, 0, 1.6), sentinel];
    let batch_b = vec![record("0xaaa", 10, 100.0, 5.0, 0, 1.6), explicit];
    assert_eq!(score_batch(&batch_a), score_batch(&batch_b));
}

proptest! {
    /// Every score is in [0, 1000] for arbitrary batches.
    #[test]
    fn prop_scores_stay_in_bounds(
        raw in prop::collection::vec(
            (0u64..10_000, 0.0f64..5_000.0, 0.0f64..10_000.0, 0u64..50, 1.0f64..10.0),
            1..40,
        )
    ) {
        let batch: Vec<WalletFeatureRecord> = raw
            .iter()
            .enumerate()
            .map(|(i, (interactions, age, recency, liquidations, health))| {
                record(&format!("0x{i:040x}"), *interactions, *age, *recency, *liquidations, *health)
            })
            .collect();
        for score in score_batch(&batch) {
            prop_assert!(score <= 1000);
        }
    }
}
