use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

/// A single externally sourced transaction record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    /// Sender address.
    pub from: String,
    /// Recipient address. Empty for contract creations.
    pub to: String,
    /// 0x-prefixed hex call payload.
    pub input: String,
    /// Unix seconds.
    pub timestamp: u64,
}

/// Supplies the full transaction history for a wallet address.
///
/// An empty list is a valid answer meaning "no relevant history"; a
/// provider failure is reported as an error so callers can tell the two
/// apart.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn transactions(&self, address: &str) -> Result<Vec<Transaction>>;
}
