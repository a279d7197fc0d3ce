//! The public-mint action: submit, then wait for confirmation.

use alloy::primitives::U256;

use crate::blockchain::{
    BlockchainError, BlockchainResult, ConfirmationPolicy, ConfirmationStatus, NftContract,
};
use crate::observability::metrics;

/// Mints one token at a fixed price.
#[derive(Debug, Clone, Copy)]
pub struct MintAction {
    price: U256,
    policy: ConfirmationPolicy,
}

impl MintAction {
    pub fn new(price: U256, policy: ConfirmationPolicy) -> Self {
        Self { price, policy }
    }

    pub fn price(&self) -> U256 {
        self.price
    }

    /// Submit `mint()` and wait for it to confirm.
    ///
    /// A reverted receipt comes back as `Reverted`; the caller owns the
    /// loading flag around this call.
    pub async fn execute(&self, contract: &NftContract) -> BlockchainResult<ConfirmationStatus> {
        let result = self.submit_and_confirm(contract).await;
        metrics::record_mint(outcome_label(&result));
        result
    }

    async fn submit_and_confirm(&self, contract: &NftContract) -> BlockchainResult<ConfirmationStatus> {
        let pending = contract.mint(self.price).await?;
        let tx_hash = pending.tx_hash();

        match pending.confirmation(self.policy).await? {
            ConfirmationStatus::Failed(reason) => {
                tracing::warn!(tx_hash = %tx_hash, reason = %reason, "Mint transaction failed");
                Err(BlockchainError::Reverted(reason))
            }
            status => {
                tracing::info!(tx_hash = %tx_hash, status = ?status, "Mint transaction confirmed");
                Ok(status)
            }
        }
    }
}

fn outcome_label(result: &BlockchainResult<ConfirmationStatus>) -> &'static str {
    match result {
        Ok(_) => "confirmed",
        Err(BlockchainError::Reverted(_)) => "reverted",
        Err(BlockchainError::UserRejected(_)) => "rejected",
        Err(_) => "error",
    }
}
