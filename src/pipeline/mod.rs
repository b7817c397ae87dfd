//! Batch scoring pipeline.
//!
//! Two explicit phases. First every wallet's raw feature record is
//! collected: fetches run on a bounded worker pool, all workers share
//! one rate limiter, and a failed or timed-out fetch degrades that
//! wallet to the sentinel record instead of aborting the run. Only after
//! the whole batch is in hand does the second phase run, because min-max
//! normalization needs full-population statistics; there is no valid
//! streaming or partial-batch variant.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::blockchain::traits::TransactionSource;
use crate::core::config::ScorerConfig;
use crate::core::errors::Result;
use crate::network::rate_limit::RateLimiter;
use crate::scoring::{
    FeatureExtractor, Normalizer, ScoreAggregator, ScoredWallet, WalletFeatureRecord,
};

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    /// One row per input wallet, in input order.
    pub scored: Vec<ScoredWallet>,
    /// Wallets whose history fetch failed and were scored from the
    /// sentinel record.
    pub failed_fetches: Vec<String>,
}

/// Orchestrates fetch, extraction, normalization and aggregation.
pub struct Pipeline<S> {
    source: Arc<S>,
    extractor: FeatureExtractor,
    aggregator: ScoreAggregator,
    limiter: RateLimiter,
    fetch_timeout: Duration,
    concurrency: usize,
}

impl<S: TransactionSource> Pipeline<S> {
    /// Builds the pipeline; fails fast on a malformed weight set so no
    /// wallet is ever fetched under a bad configuration.
    pub fn new(config: &ScorerConfig, source: Arc<S>) -> Result<Self> {
        let extractor = FeatureExtractor::new(&config.scoring.protocol_contracts);
        let aggregator = ScoreAggregator::new(config.scoring.weights)?;
        let limiter =
            RateLimiter::new(Duration::from_millis(config.provider.min_request_interval_ms));
        Ok(Self {
            source,
            extractor,
            aggregator,
            limiter,
            fetch_timeout: Duration::from_secs(config.provider.timeout_secs),
            concurrency: config.provider.concurrency.max(1),
        })
    }

    /// Scores `wallets` at reference time `now` (unix seconds). Output
    /// order matches input order.
    pub async fn run(&self, wallets: &[String], now: u64) -> Result<RunSummary> {
        // Phase 1: materialize the full batch. `buffered` keeps input
        // order while letting up to `concurrency` fetches overlap; the
        // final collect is the join barrier scoring waits on.
        let collected: Vec<(WalletFeatureRecord, bool)> = stream::iter(wallets)
            .map(|wallet| self.collect_wallet(wallet, now))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut failed_fetches = Vec::new();
        let mut batch = Vec::with_capacity(collected.len());
        for (record, fetch_failed) in collected {
            if fetch_failed {
                failed_fetches.push(record.wallet.clone());
            }
            batch.push(record);
        }

        // Phase 2: population-wide normalization, then per-wallet scores.
        let normalized = Normalizer::normalize(&batch);
        let scored = normalized.iter().map(|record| self.aggregator.score(record)).collect();

        Ok(RunSummary { scored, failed_fetches })
    }

    async fn collect_wallet(&self, wallet: &str, now: u64) -> (WalletFeatureRecord, bool) {
        self.limiter.acquire().await;
        debug!(wallet, "fetching transaction history");
        match tokio::time::timeout(self.fetch_timeout, self.source.transactions(wallet)).await {
            Ok(Ok(txs)) => (self.extractor.extract(wallet, now, &txs), false),
            Ok(Err(err)) => {
                warn!(wallet, %err, "history fetch failed, scoring from sentinel record");
                (WalletFeatureRecord::sentinel(wallet), true)
            }
            Err(_) => {
                warn!(
                    wallet,
                    timeout_secs = self.fetch_timeout.as_secs(),
                    "history fetch timed out, scoring from sentinel record"
                );
                (WalletFeatureRecord::sentinel(wallet), true)
            }
        }
    }
}
