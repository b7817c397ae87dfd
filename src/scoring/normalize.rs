//! Population-relative normalization of raw feature records.
//!
//! Each dimension is min-max scaled over the whole batch and oriented so
//! that 1.0 always reads "riskier": health factor, wallet age and the
//! log-transformed activity are inverted, liquidations and recency are
//! not. The inversions and the log transform are scoring policy (older,
//! healthier, more active wallets are treated as lower risk, with
//! diminishing returns on activity), not empirically fitted facts.

use crate::scoring::features::WalletFeatureRecord;

/// Feature record rescaled to risk-direction [0,1] dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFeatureRecord {
    pub wallet: String,
    pub liquidation: f64,
    pub health_factor: f64,
    pub recency: f64,
    pub age: f64,
    pub activity: f64,
}

/// Min-max normalizer over a complete batch.
///
/// Normalization is population-relative: a wallet's dimensions (and so
/// its final score) depend on the batch it is scored alongside. The full
/// batch must be materialized before calling [`Normalizer::normalize`];
/// there is no valid per-wallet incremental variant.
pub struct Normalizer;

impl Normalizer {
    /// Produces one normalized record per input record, preserving order
    /// and wallet identity.
    pub fn normalize(batch: &[WalletFeatureRecord]) -> Vec<NormalizedFeatureRecord> {
        let liquidation = scale(batch, |r| r.liquidation_count as f64);
        let health_factor = scale(batch, |r| r.health_factor_proxy);
        let recency = scale(batch, |r| r.days_since_last_tx);
        let age = scale(batch, |r| r.wallet_age_days);
        let activity = scale(batch, |r| (r.interaction_count as f64).ln_1p());

        batch
            .iter()
            .enumerate()
            .map(|(i, record)| NormalizedFeatureRecord {
                wallet: record.wallet.clone(),
                liquidation: liquidation[i],
                health_factor: 1.0 - health_factor[i],
                recency: recency[i],
                age: 1.0 - age[i],
                activity: 1.0 - activity[i],
            })
            .collect()
    }
}

/// Min-max scales one dimension across the batch. When every value is
/// identical the whole dimension is defined as 0.0, which keeps the
/// division well-formed; that is documented behavior, not an error.
fn scale(
    batch: &[WalletFeatureRecord],
    dimension: impl Fn(&WalletFeatureRecord) -> f64,
) -> Vec<f64> {
    let values: Vec<f64> = batch.iter().map(dimension).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.into_iter().map(|v| (v - min) / range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_degenerate_batch_is_all_zeros() {
        let batch = vec![
            record("0xaaa", 10, 100.0, 5.0, 0, 1.6),
            record("0xbbb", 10, 100.0, 5.0, 0, 1.6),
            record("0xccc", 10, 100.0, 5.0, 0, 1.6),
        ];
        for normalized in Normalizer::normalize(&batch) {
            assert_eq!(normalized.liquidation, 0.0);
            assert_eq!(normalized.health_factor, 0.0);
            assert_eq!(normalized.recency, 0.0);
            assert_eq!(normalized.age, 0.0);
            assert_eq!(normalized.activity, 0.0);
        }
    }

    #[test]
    fn test_direction_policy() {
        let batch = vec![
            // Safe profile: old, active, healthy, recent, never liquidated.
            record("0xsafe", 500, 1000.0, 1.0, 0, 3.0),
            // Risky profile: new, inactive, unhealthy, stale, liquidated.
            record("0xrisky", 1, 10.0, 400.0, 2, 1.1),
        ];
        let normalized = Normalizer::normalize(&batch);
        let safe = &normalized[0];
        let risky = &normalized[1];

        assert_eq!(safe.liquidation, 0.0);
        assert_eq!(risky.liquidation, 1.0);
        // Inverted dimensions: the healthy/old/active wallet ends at 0.
        assert_eq!(safe.health_factor, 0.0);
        assert_eq!(risky.health_factor, 1.0);
        assert_eq!(safe.age, 0.0);
        assert_eq!(risky.age, 1.0);
        assert_eq!(safe.activity, 0.0);
        assert_eq!(risky.activity, 1.0);
        assert_eq!(safe.recency, 0.0);
        assert_eq!(risky.recency, 1.0);
    }

    #[test]
    fn test_all_dimensions_stay_in_unit_range() {
        let batch = vec![
            record("0xaaa", 10, 100.0, 5.0, 0, 1.6),
            record("0xbbb", 200, 500.0, 400.0, 1, 2.2),
            record("0xccc", 0, 0.0, 9999.0, 0, 1.0),
            record("0xddd", 57, 42.0, 3.5, 4, 1.9),
        ];
        for normalized in Normalizer::normalize(&batch) {
            for value in [
                normalized.liquidation,
                normalized.health_factor,
                normalized.recency,
                normalized.age,
                normalized.activity,
            ] {
                assert!((0.0..=1.0).contains(&value), "out of range: {value}");
            }
        }
    }

    #[test]
    fn test_order_and_identity_preserved() {
        let batch = vec![
            record("0xbbb", 200, 500.0, 400.0, 1, 2.2),
            record("0xaaa", 10, 100.0, 5.0, 0, 1.6),
        ];
        let normalized = Normalizer::normalize(&batch);
        assert_eq!(normalized[0].wallet, "0xbbb");
        assert_eq!(normalized[1].wallet, "0xaaa");
    }

    #[test]
    fn test_empty_batch() {
        assert!(Normalizer::normalize(&[]).is_empty());
    }
}
