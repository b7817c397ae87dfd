//! Feature engineering and scoring.
//!
//! The core of the crate: raw transaction history becomes a fixed-shape
//! feature record per wallet, the full batch is min-max normalized into
//! risk-direction dimensions, and fixed weights aggregate those into one
//! trust score per wallet.

pub mod aggregate;
pub mod features;
pub mod liquidation;
pub mod normalize;

pub use aggregate::{ScoreAggregator, ScoredWallet, ScoringWeights};
pub use features::{FeatureExtractor, WalletFeatureRecord};
pub use liquidation::{LiquidationDetector, SelectorSubstringDetector};
pub use normalize::{NormalizedFeatureRecord, Normalizer};
