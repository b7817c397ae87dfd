//! Weighted aggregation of normalized risk dimensions into a trust score.

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, ScorerError};
use crate::scoring::normalize::NormalizedFeatureRecord;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight of each risk dimension in the aggregate. Must sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "ScoringWeights::default_liquidation")]
    pub liquidation: f64,
    #[serde(default = "ScoringWeights::default_health_factor")]
    pub health_factor: f64,
    #[serde(default = "ScoringWeights::default_recency")]
    pub recency: f64,
    #[serde(default = "ScoringWeights::default_age")]
    pub age: f64,
    #[serde(default = "ScoringWeights::default_activity")]
    pub activity: f64,
}

impl ScoringWeights {
    fn default_liquidation() -> f64 {
        0.40
    }
    fn default_health_factor() -> f64 {
        0.30
    }
    fn default_recency() -> f64 {
        0.15
    }
    fn default_age() -> f64 {
        0.10
    }
    fn default_activity() -> f64 {
        0.05
    }

    pub fn sum(&self) -> f64 {
        self.liquidation + self.health_factor + self.recency + self.age + self.activity
    }

    /// Startup invariant: the weights must sum to 1.0 within a small
    /// floating tolerance. Checked once before any wallet is scored.
    pub fn validate(&self) -> Result<()> {
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScorerError::Config(format!(
                "scoring weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            liquidation: Self::default_liquidation(),
            health_factor: Self::default_health_factor(),
            recency: Self::default_recency(),
            age: Self::default_age(),
            activity: Self::default_activity(),
        }
    }
}

/// Final output row. Higher score = lower risk, inverted from the
/// internal risk score for the user-facing "trust" semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredWallet {
    pub wallet: String,
    /// Trust score in [0, 1000].
    pub score: u32,
}

/// Combines normalized dimensions into one score per wallet.
pub struct ScoreAggregator {
    weights: ScoringWeights,
}

impl ScoreAggregator {
    /// Validates the weight invariant up front; construction fails on a
    /// malformed weight set.
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Internal risk score in [0,1]; 0 = safe, 1 = risky.
    pub fn risk_score(&self, record: &NormalizedFeatureRecord) -> f64 {
        let w = &self.weights;
        w.liquidation * record.liquidation
            + w.health_factor * record.health_factor
            + w.recency * record.recency
            + w.age * record.age
            + w.activity * record.activity
    }

    /// User-facing trust score in [0, 1000].
    pub fn score(&self, record: &NormalizedFeatureRecord) -> ScoredWallet {
        let risk = self.risk_score(record);
        let score = ((1.0 - risk) * 1000.0).floor().clamp(0.0, 1000.0) as u32;
        ScoredWallet { wallet: record.wallet.clone(), score }
    }
}
