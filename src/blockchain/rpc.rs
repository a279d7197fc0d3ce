//! JSON-RPC backed wallet provider.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint with the wallet's signing filler
//! - Bound every request with the configured timeout
//! - Prompt before signing, like a wallet extension does
//! - Classify node errors into [`BlockchainError`] variants

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::TransportResult;
use async_trait::async_trait;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::approval::{ApprovalPrompt, ApprovalRequest};
use crate::blockchain::connector::RawProvider;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ReceiptSummary};
use crate::blockchain::wallet::Wallet;
use crate::observability::metrics;

/// Wallet provider talking to a node over HTTP.
pub struct RpcProvider {
    provider: Arc<dyn Provider + Send + Sync>,
    account: Address,
    rpc_url: String,
    timeout_secs: u64,
    prompt: Arc<dyn ApprovalPrompt>,
}

impl RpcProvider {
    /// Build a provider that signs with `wallet`.
    ///
    /// No request is made here; an unreachable node surfaces on first use.
    pub fn connect(
        rpc_url: &str,
        wallet: Wallet,
        timeout_secs: u64,
        prompt: Arc<dyn ApprovalPrompt>,
    ) -> BlockchainResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let account = wallet.address();
        let provider = ProviderBuilder::new()
            .wallet(wallet.into_ethereum_wallet())
            .connect_http(url);

        Ok(Self {
            provider: Arc::new(provider) as Arc<dyn Provider + Send + Sync>,
            account,
            rpc_url: rpc_url.to_string(),
            timeout_secs,
            prompt,
        })
    }

    async fn request<T, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        let result = match timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::from_rpc(e))
            }
            Err(_) => {
                tracing::warn!(method, timeout_secs = self.timeout_secs, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_secs))
            }
        };
        metrics::record_rpc_health(!matches!(
            result,
            Err(BlockchainError::Rpc(_) | BlockchainError::Timeout(_))
        ));
        result
    }
}

#[async_trait]
impl RawProvider for RpcProvider {
    fn accounts(&self) -> Vec<Address> {
        vec![self.account]
    }

    async fn chain_id(&self) -> BlockchainResult<u64> {
        self.request("eth_chainId", self.provider.get_chain_id()).await
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.request("eth_blockNumber", self.provider.get_block_number()).await
    }

    async fn call(&self, tx: TransactionRequest) -> BlockchainResult<Bytes> {
        self.request("eth_call", self.provider.call(tx)).await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        let request = ApprovalRequest::SendTransaction {
            from: tx.from,
            to: tx.to.and_then(|kind| kind.to().copied()),
            value: tx.value.unwrap_or_default(),
        };
        if !self.prompt.approve(&request).await {
            return Err(BlockchainError::UserRejected(
                "transaction signature declined".to_string(),
            ));
        }

        let pending = self
            .request("eth_sendTransaction", self.provider.send_transaction(tx))
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_status(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
        let receipt = self
            .request(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(tx_hash),
            )
            .await?;

        Ok(receipt.map(|r| ReceiptSummary {
            success: r.status(),
            block_number: r.block_number,
        }))
    }
}

impl std::fmt::Debug for RpcProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcProvider")
            .field("rpc_url", &self.rpc_url)
            .field("account", &self.account)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
