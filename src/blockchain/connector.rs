//! Wallet connector: turns "connect" into a raw provider handle.
//!
//! # Responsibilities
//! - Locate the wallet (fail with `NoWalletFound` when there is none)
//! - Ask the user to approve the connection (`UserRejected` when declined)
//! - Hand back a [`ProviderHandle`] speaking the wallet's request surface

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::sync::Arc;

use crate::blockchain::approval::{ApprovalPrompt, ApprovalRequest};
use crate::blockchain::rpc::RpcProvider;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ReceiptSummary};
use crate::blockchain::wallet::Wallet;
use crate::config::{NetworkConfig, WalletConfig};

/// The request surface a connected wallet exposes (EIP-1193 shaped).
#[async_trait]
pub trait RawProvider: Send + Sync {
    /// Accounts the wallet exposes to the page, signer first.
    fn accounts(&self) -> Vec<Address>;

    /// `eth_chainId`
    async fn chain_id(&self) -> BlockchainResult<u64>;

    /// `eth_blockNumber`
    async fn block_number(&self) -> BlockchainResult<u64>;

    /// `eth_call` against the latest block.
    async fn call(&self, tx: TransactionRequest) -> BlockchainResult<Bytes>;

    /// `eth_sendTransaction`; the wallet signs and broadcasts.
    async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash>;

    /// `eth_getTransactionReceipt`, `None` while the transaction is pending.
    async fn transaction_status(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>>;
}

/// Shared handle to a connected wallet provider.
pub type ProviderHandle = Arc<dyn RawProvider>;

/// Connects to a wallet.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// May prompt the user. No retry; callers re-invoke on failure.
    async fn connect(&self) -> BlockchainResult<ProviderHandle>;
}

/// Connector for a wallet whose key is injected through the environment.
pub struct EnvWalletConnector {
    wallet: WalletConfig,
    network: NetworkConfig,
    prompt: Arc<dyn ApprovalPrompt>,
}

impl EnvWalletConnector {
    pub fn new(wallet: WalletConfig, network: NetworkConfig, prompt: Arc<dyn ApprovalPrompt>) -> Self {
        Self {
            wallet,
            network,
            prompt,
        }
    }
}

#[async_trait]
impl WalletConnector for EnvWalletConnector {
    async fn connect(&self) -> BlockchainResult<ProviderHandle> {
        let wallet = Wallet::from_env(&self.wallet.private_key_env)?;
        let account = wallet.address();

        if !self.prompt.approve(&ApprovalRequest::Connect { account }).await {
            return Err(BlockchainError::UserRejected(
                "connection request declined".to_string(),
            ));
        }

        let provider = RpcProvider::connect(
            &self.network.rpc_url,
            wallet,
            self.network.rpc_timeout_secs,
            self.prompt.clone(),
        )?;

        tracing::info!(
            account = %account,
            rpc_url = %self.network.rpc_url,
            "Wallet connected"
        );

        Ok(Arc::new(provider))
    }
}

impl std::fmt::Debug for EnvWalletConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvWalletConnector")
            .field("private_key_env", &self.wallet.private_key_env)
            .field("rpc_url", &self.network.rpc_url)
            .finish()
    }
}
