//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mint page.
//! All types derive Serde traits for deserialization from config files.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::blockchain::types::MUMBAI;

/// Root configuration for the mint page.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MinterConfig {
    /// Wallet (signing key) settings.
    pub wallet: WalletConfig,

    /// RPC endpoint and required network.
    pub network: NetworkConfig,

    /// NFT contract location and supply.
    pub contract: ContractConfig,

    /// Minted-count polling.
    pub poller: PollerConfig,

    /// Mint transaction settings.
    pub mint: MintConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Name of the environment variable holding the hex private key.
    pub private_key_env: String,

    /// Approve connection and transaction prompts without asking.
    pub auto_approve: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            private_key_env: "MINTER_PRIVATE_KEY".to_string(),
            auto_approve: false,
        }
    }
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Human readable network name, used in the wrong-network notice.
    pub name: String,

    /// The only chain ID the page accepts (80001 = Polygon Mumbai).
    pub required_chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://rpc-mumbai.maticvigil.com".to_string(),
            name: "Polygon Mumbai".to_string(),
            required_chain_id: MUMBAI.into(),
            rpc_timeout_secs: 10,
        }
    }
}

/// Contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the NFT contract.
    pub address: String,

    /// Collection size shown in the counter line.
    pub max_supply: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            max_supply: 10,
        }
    }
}

impl ContractConfig {
    /// Parse the configured contract address.
    pub fn parsed_address(&self) -> Result<Address, String> {
        self.address
            .parse()
            .map_err(|e| format!("invalid contract address '{}': {}", self.address, e))
    }
}

/// Poller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Interval between minted-count reads in milliseconds.
    pub interval_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Mint transaction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MintConfig {
    /// Mint price in native currency units (e.g. "0.01").
    pub price: String,

    /// Number of block confirmations before a mint counts as done.
    pub confirmation_blocks: u32,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_ms: u64,

    /// Maximum time to wait for confirmation in seconds.
    pub confirmation_timeout_secs: u64,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            price: "0.01".to_string(),
            confirmation_blocks: 1,
            receipt_poll_ms: 2000,
            confirmation_timeout_secs: 120,
        }
    }
}

impl MintConfig {
    /// Mint price in wei.
    pub fn price_wei(&self) -> Result<U256, String> {
        parse_ether(&self.price).map_err(|e| format!("invalid mint price '{}': {}", self.price, e))
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
