//! Runtime configuration.
//!
//! Every setting is constructed once at startup from a TOML file (plus
//! the `ETHERSCAN_API_KEY` environment variable) and handed to the
//! components by value; there is no process-wide mutable state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ethers::types::Address;

use crate::core::errors::{Result, ScorerError};
use crate::scoring::aggregate::ScoringWeights;

/// Compound protocol contracts scored against by default: the v2 cETH,
/// cUSDC and cDAI markets plus the v3 USDC market.
pub const DEFAULT_PROTOCOL_CONTRACTS: [&str; 4] = [
    "0x4ddc2d193948926d02f9b1fe9e1daa0718270ed5", // cETH
    "0x39aa39c021dfbae8fac545936693ac917d5e7563", // cUSDC
    "0x5d3a536e4d6dbd6114cc1ead35777bab948e3643", // cDAI
    "0xc3d688b66703497daa19211eedff47f25384cdc3", // Compound v3 USDC market
];

/// Transaction provider (Etherscan) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Network name ("mainnet", "sepolia").
    #[serde(default = "ProviderConfig::default_network")]
    pub network: String,

    /// Explicit API base URL. Overrides `network` when set; used by tests.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Etherscan API key. Falls back to the ETHERSCAN_API_KEY env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// HTTP timeout per request (seconds).
    #[serde(default = "ProviderConfig::default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum delay between consecutive outbound requests (milliseconds).
    #[serde(default = "ProviderConfig::default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// Number of wallet histories fetched concurrently.
    #[serde(default = "ProviderConfig::default_concurrency")]
    pub concurrency: usize,
}

impl ProviderConfig {
    fn default_network() -> String {
        "mainnet".to_string()
    }
    fn default_timeout_secs() -> u64 {
        15
    }
    fn default_min_request_interval_ms() -> u64 {
        250
    }
    fn default_concurrency() -> usize {
        4
    }

    /// Resolved API key: explicit config value, else the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key.clone().or_else(|| std::env::var("ETHERSCAN_API_KEY").ok())
    }

    /// Resolved API base URL for the configured network.
    pub fn resolved_base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.trim_end_matches('/').to_string();
        }
        match self.network.as_str() {
            "mainnet" | "eth" => "https://api.etherscan.io".to_string(),
            "sepolia" => "https://api-sepolia.etherscan.io".to_string(),
            _ => "https://api.etherscan.io".to_string(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            network: Self::default_network(),
            base_url: None,
            api_key: None,
            timeout_secs: Self::default_timeout_secs(),
            min_request_interval_ms: Self::default_min_request_interval_ms(),
            concurrency: Self::default_concurrency(),
        }
    }
}

/// Feature extraction and scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Lending protocol contract addresses; a transaction counts as a
    /// protocol interaction when its recipient is one of these.
    #[serde(default = "ScoringConfig::default_protocol_contracts")]
    pub protocol_contracts: Vec<String>,

    /// Wallet addresses to score, in deliverable row order.
    #[serde(default)]
    pub wallets: Vec<String>,

    /// Risk dimension weights.
    #[serde(default)]
    pub weights: ScoringWeights,
}

impl ScoringConfig {
    fn default_protocol_contracts() -> Vec<String> {
        DEFAULT_PROTOCOL_CONTRACTS.iter().map(|c| c.to_string()).collect()
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            protocol_contracts: Self::default_protocol_contracts(),
            wallets: Vec::new(),
            weights: ScoringWeights::default(),
        }
    }
}

/// Deliverable output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file written after a run.
    #[serde(default = "OutputConfig::default_path")]
    pub path: PathBuf,
}

impl OutputConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("wallet_scores.csv")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: Self::default_path() }
    }
}

/// Top-level scorer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl ScorerConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScorerError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ScorerError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Pre-flight validation, run once before any wallet is processed.
    pub fn validate(&self) -> Result<()> {
        if self.scoring.wallets.is_empty() {
            return Err(ScorerError::Config("wallet list is empty".to_string()));
        }
        if self.scoring.protocol_contracts.is_empty() {
            return Err(ScorerError::Config("protocol contract list is empty".to_string()));
        }
        for address in self.scoring.wallets.iter().chain(&self.scoring.protocol_contracts) {
            if Address::from_str(address).is_err() {
                return Err(ScorerError::Config(format!("invalid address: {address}")));
            }
        }
        if self.provider.concurrency == 0 {
            return Err(ScorerError::Config(
                "provider.concurrency must be greater than 0".to_string(),
            ));
        }
        self.scoring.weights.validate()
    }
}
