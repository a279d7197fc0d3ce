//! Shared mocks for the page integration tests.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nft_minter::blockchain::{
    BlockchainError, BlockchainResult, ProviderHandle, RawProvider, ReceiptSummary,
    WalletConnector,
};
use nft_minter::MinterConfig;

pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const RECEIPT_BLOCK: u64 = 10;

/// In-memory wallet provider with a scripted chain.
pub struct MockProvider {
    pub chain_id: AtomicU64,
    pub supply: AtomicU64,
    pub account: Address,
    pub reads: AtomicUsize,
    pub sends: AtomicUsize,
    pub confirmed: AtomicBool,
    pub reverted: AtomicBool,
    pub send_error: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new(chain_id: u64, supply: u64) -> Arc<Self> {
        Arc::new(Self {
            chain_id: AtomicU64::new(chain_id),
            supply: AtomicU64::new(supply),
            account: Address::repeat_byte(0xab),
            reads: AtomicUsize::new(0),
            sends: AtomicUsize::new(0),
            confirmed: AtomicBool::new(false),
            reverted: AtomicBool::new(false),
            send_error: Mutex::new(None),
        })
    }

    /// Mine the pending mint: the receipt appears and the supply grows.
    pub fn confirm_mint(&self) {
        self.supply.fetch_add(1, Ordering::SeqCst);
        self.confirmed.store(true, Ordering::SeqCst);
    }

    pub fn fail_sends_with(&self, message: &str) {
        *self.send_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RawProvider for MockProvider {
    fn accounts(&self) -> Vec<Address> {
        vec![self.account]
    }

    async fn chain_id(&self) -> BlockchainResult<u64> {
        Ok(self.chain_id.load(Ordering::SeqCst))
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        Ok(RECEIPT_BLOCK)
    }

    async fn call(&self, _tx: TransactionRequest) -> BlockchainResult<Bytes> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let supply = U256::from(self.supply.load(Ordering::SeqCst));
        Ok(Bytes::from(supply.to_be_bytes::<32>().to_vec()))
    }

    async fn send_transaction(&self, _tx: TransactionRequest) -> BlockchainResult<TxHash> {
        if let Some(message) = self.send_error.lock().unwrap().clone() {
            return Err(BlockchainError::from_rpc(message));
        }
        self.sends.fetch_add(1, Ordering::SeqCst);
        Ok(TxHash::repeat_byte(0x01))
    }

    async fn transaction_status(&self, _tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
        if self.reverted.load(Ordering::SeqCst) {
            return Ok(Some(ReceiptSummary {
                success: false,
                block_number: Some(RECEIPT_BLOCK),
            }));
        }
        if self.confirmed.load(Ordering::SeqCst) {
            return Ok(Some(ReceiptSummary {
                success: true,
                block_number: Some(RECEIPT_BLOCK),
            }));
        }
        Ok(None)
    }
}

/// How the mock wallet answers a connection request.
#[derive(Debug, Clone, Copy)]
pub enum ConnectOutcome {
    Accept,
    Reject,
    NoWallet,
    /// Never answers, like an unattended wallet popup.
    Hang,
}

pub struct MockConnector {
    pub provider: Arc<MockProvider>,
    pub outcome: ConnectOutcome,
    pub connects: AtomicUsize,
}

impl MockConnector {
    pub fn new(provider: Arc<MockProvider>, outcome: ConnectOutcome) -> Arc<Self> {
        Arc::new(Self {
            provider,
            outcome,
            connects: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl WalletConnector for MockConnector {
    async fn connect(&self) -> BlockchainResult<ProviderHandle> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            ConnectOutcome::Accept => Ok(self.provider.clone()),
            ConnectOutcome::Reject => Err(BlockchainError::UserRejected(
                "connection request declined".to_string(),
            )),
            ConnectOutcome::NoWallet => Err(BlockchainError::NoWalletFound(
                "no injected wallet".to_string(),
            )),
            ConnectOutcome::Hang => std::future::pending().await,
        }
    }
}

/// Valid config with intervals short enough for tests.
pub fn test_config() -> MinterConfig {
    let mut config = MinterConfig::default();
    config.contract.address = CONTRACT.to_string();
    config.poller.interval_ms = 20;
    config.mint.receipt_poll_ms = 10;
    config.mint.confirmation_timeout_secs = 5;
    config
}

/// Poll `condition` until it holds or `timeout` passes.
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// Run `fut` with a generous upper bound so a bug hangs no test run.
#[allow(dead_code)]
pub async fn bounded<T>(fut: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(10), fut)
        .await
        .expect("operation did not finish in time")
}
