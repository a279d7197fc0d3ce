//! Confirmation monitoring for submitted transactions.

use alloy::primitives::TxHash;
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::connector::RawProvider;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::config::MintConfig;

/// `tokio::time::interval` rejects a zero period.
pub(crate) const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// How long and how deep to wait for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Blocks including the one the transaction landed in.
    pub confirmation_blocks: u32,
    /// Receipt polling interval.
    pub poll_interval: Duration,
    /// Overall deadline.
    pub timeout: Duration,
}

impl From<&MintConfig> for ConfirmationPolicy {
    fn from(config: &MintConfig) -> Self {
        Self {
            confirmation_blocks: config.confirmation_blocks.max(1),
            poll_interval: Duration::from_millis(config.receipt_poll_ms),
            timeout: Duration::from_secs(config.confirmation_timeout_secs),
        }
    }
}

/// Wait for a transaction to be confirmed.
///
/// Returns `Confirmed` once the receipt is `confirmation_blocks` deep,
/// `Failed` if it reverted, and `ConfirmationTimeout` past the deadline.
pub async fn wait_for_confirmation(
    provider: &dyn RawProvider,
    tx_hash: TxHash,
    policy: ConfirmationPolicy,
) -> BlockchainResult<ConfirmationStatus> {
    let required = policy.confirmation_blocks.max(1);

    let result = timeout(policy.timeout, async {
        let mut ticker = interval(policy.poll_interval.max(MIN_POLL_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let receipt = match provider.transaction_status(tx_hash).await? {
                Some(r) => r,
                None => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
            };

            if !receipt.success {
                return Ok(ConfirmationStatus::Failed("Transaction reverted".to_string()));
            }

            let current_block = provider.block_number().await?;
            let tx_block = receipt.block_number.unwrap_or(current_block);
            let status = confirmation_status(tx_block, current_block, required);

            match status {
                ConfirmationStatus::Confirmed { .. } => return Ok(status),
                ConfirmationStatus::Confirming { current, required } => {
                    tracing::debug!(
                        tx_hash = %tx_hash,
                        confirmations = current,
                        required = required,
                        "Waiting for confirmations"
                    );
                }
                _ => {}
            }
        }
    })
    .await;

    match result {
        Ok(status) => status,
        Err(_) => Err(BlockchainError::ConfirmationTimeout(required)),
    }
}

/// Confirmations count the inclusion block itself.
fn confirmation_status(tx_block: u64, current_block: u64, required: u32) -> ConfirmationStatus {
    let depth = current_block.saturating_sub(tx_block).saturating_add(1);
    let current = u32::try_from(depth).unwrap_or(u32::MAX);
    if current >= required {
        ConfirmationStatus::Confirmed {
            block_number: tx_block,
        }
    } else {
        ConfirmationStatus::Confirming { current, required }
    }
}
