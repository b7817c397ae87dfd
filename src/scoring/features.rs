//! Per-wallet feature extraction from raw transaction history.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::blockchain::traits::Transaction;
use crate::scoring::liquidation::{LiquidationDetector, SelectorSubstringDetector};

/// `days_since_last_tx` sentinel meaning "no protocol interaction ever".
pub const NO_INTERACTION_RECENCY_DAYS: f64 = 9999.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Raw feature record, created exactly once per wallet per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletFeatureRecord {
    /// Lowercased 0x-prefixed wallet address.
    pub wallet: String,
    pub interaction_count: u64,
    /// Days since the first protocol interaction.
    pub wallet_age_days: f64,
    pub days_since_last_tx: f64,
    pub liquidation_count: u64,
    /// Synthetic solvency proxy, floored at 1.0.
    pub health_factor_proxy: f64,
}

impl WalletFeatureRecord {
    /// Record for a wallet with no protocol-relevant transactions. Used
    /// both for genuinely empty histories and for failed fetches, so
    /// every input wallet always yields exactly one output row.
    pub fn sentinel(wallet: &str) -> Self {
        Self {
            wallet: wallet.to_lowercase(),
            interaction_count: 0,
            wallet_age_days: 0.0,
            days_since_last_tx: NO_INTERACTION_RECENCY_DAYS,
            liquidation_count: 0,
            health_factor_proxy: 1.0,
        }
    }
}

/// Turns one wallet's transaction history into a [`WalletFeatureRecord`].
///
/// Pure with respect to its inputs: the reference time is injected by
/// the caller, never read from the wall clock, so extraction is
/// deterministic and testable.
pub struct FeatureExtractor {
    /// Lowercased protocol contract addresses.
    contracts: Vec<String>,
    detector: Arc<dyn LiquidationDetector>,
}

impl FeatureExtractor {
    pub fn new(protocol_contracts: &[String]) -> Self {
        Self::with_detector(protocol_contracts, Arc::new(SelectorSubstringDetector))
    }

    pub fn with_detector(
        protocol_contracts: &[String],
        detector: Arc<dyn LiquidationDetector>,
    ) -> Self {
        let contracts = protocol_contracts.iter().map(|c| c.to_lowercase()).collect();
        Self { contracts, detector }
    }

    /// Extracts the feature record for `wallet` at reference time `now`
    /// (unix seconds).
    pub fn extract(&self, wallet: &str, now: u64, txs: &[Transaction]) -> WalletFeatureRecord {
        let wallet = wallet.to_lowercase();

        let mut protocol_txs: Vec<&Transaction> =
            txs.iter().filter(|tx| self.is_protocol_tx(tx)).collect();
        if protocol_txs.is_empty() {
            return WalletFeatureRecord::sentinel(&wallet);
        }
        // Provider ordering is not trusted; sort before taking extremes.
        protocol_txs.sort_by_key(|tx| tx.timestamp);

        let interaction_count = protocol_txs.len() as u64;
        let first = protocol_txs[0].timestamp;
        let last = protocol_txs[protocol_txs.len() - 1].timestamp;
        let wallet_age_days = now.saturating_sub(first) as f64 / SECONDS_PER_DAY;
        let days_since_last_tx = now.saturating_sub(last) as f64 / SECONDS_PER_DAY;

        // The liquidation scan runs over the unfiltered history; the
        // allow-list check is part of the predicate.
        let liquidation_count = txs
            .iter()
            .filter(|tx| self.is_protocol_tx(tx) && self.detector.is_liquidation_of(&wallet, tx))
            .count() as u64;

        let health_factor_proxy = health_factor_proxy(wallet_age_days, interaction_count);

        WalletFeatureRecord {
            wallet,
            interaction_count,
            wallet_age_days,
            days_since_last_tx,
            liquidation_count,
            health_factor_proxy,
        }
    }

    fn is_protocol_tx(&self, tx: &Transaction) -> bool {
        let to = tx.to.to_lowercase();
        self.contracts.iter().any(|c| *c == to)
    }
}

/// Synthetic solvency proxy: older, more active wallets read as safer.
/// Scoring policy, not derived from live collateral/debt state.
fn health_factor_proxy(age_days: f64, interactions: u64) -> f64 {
    let raw = 1.5 + (age_days / 365.0) * 0.5 + (interactions as f64 / 100.0) * 0.1;
    raw.max(1.1)
}
