//! Etherscan API client.
//!
//! Fetches the normal-transaction history that feature extraction runs
//! on, via `module=account&action=txlist`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::blockchain::traits::{Transaction, TransactionSource};
use crate::core::config::ProviderConfig;
use crate::core::errors::{Result, ScorerError};

/// Etherscan API client.
pub struct EtherscanClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

/// Etherscan API envelope. `result` is an array on success but a plain
/// string on several error paths, so it is parsed in a second step.
#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    message: String,
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct EtherscanTransaction {
    hash: String,
    from: String,
    #[serde(default)]
    to: String,
    #[serde(default)]
    input: String,
    #[serde(rename = "timeStamp")]
    timestamp: String,
}

impl From<EtherscanTransaction> for Transaction {
    fn from(tx: EtherscanTransaction) -> Self {
        Self {
            hash: tx.hash,
            from: tx.from,
            to: tx.to,
            input: tx.input,
            timestamp: tx.timestamp.parse().unwrap_or(0),
        }
    }
}

impl EtherscanClient {
    /// Creates a client for the configured network.
    pub fn new(provider: &ProviderConfig) -> Result<Self> {
        let api_key = provider.resolved_api_key().unwrap_or_else(|| {
            warn!("no Etherscan API key configured, using the free shared quota");
            "YourApiKeyToken".to_string()
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()
            .map_err(|e| ScorerError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { api_key, base_url: provider.resolved_base_url(), client })
    }
}

#[async_trait]
impl TransactionSource for EtherscanClient {
    async fn transactions(&self, address: &str) -> Result<Vec<Transaction>> {
        let url = format!(
            "{}/api?module=account&action=txlist&address={}&startblock=0&endblock=99999999&sort=asc&apikey={}",
            self.base_url, address, self.api_key
        );

        let response: EtherscanResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| provider_error(address, format!("request failed: {e}")))?
            .json()
            .await
            .map_err(|e| provider_error(address, format!("malformed response: {e}")))?;

        if response.status == "1" {
            let txs: Vec<EtherscanTransaction> = serde_json::from_value(response.result)
                .map_err(|e| provider_error(address, format!("malformed result: {e}")))?;
            debug!(address, transactions = txs.len(), "fetched transaction history");
            return Ok(txs.into_iter().map(Transaction::from).collect());
        }

        // Etherscan reports an empty history as status "0" with this
        // message; that is a valid answer, not a provider failure.
        if response.message.starts_with("No transactions found") {
            return Ok(Vec::new());
        }

        let detail = response
            .result
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| response.message.clone());
        Err(provider_error(address, detail))
    }
}

fn provider_error(wallet: &str, message: String) -> ScorerError {
    ScorerError::Provider { wallet: wallet.to_string(), message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_base_url_by_network() {
        let mut provider = ProviderConfig::default();
        provider.api_key = Some("test_key".to_string());

        let client = EtherscanClient::new(&provider).unwrap();
        assert_eq!(client.base_url, "https://api.etherscan.io");

        provider.network = "sepolia".to_string();
        let client = EtherscanClient::new(&provider).unwrap();
        assert_eq!(client.base_url, "https://api-sepolia.etherscan.io");
    }

    #[test]
    fn test_transaction_conversion() {
        let tx = EtherscanTransaction {
            hash: "0xdead".to_string(),
            from: "0xaaa".to_string(),
            to: "0xbbb".to_string(),
            input: "0xf5e3c462".to_string(),
            timestamp: "1650000000".to_string(),
        };
        let tx: Transaction = tx.into();
        assert_eq!(tx.timestamp, 1_650_000_000);

        let bad = EtherscanTransaction {
            hash: "0xdead".to_string(),
            from: "0xaaa".to_string(),
            to: String::new(),
            input: String::new(),
            timestamp: "garbage".to_string(),
        };
        let bad: Transaction = bad.into();
        assert_eq!(bad.timestamp, 0);
    }
}
