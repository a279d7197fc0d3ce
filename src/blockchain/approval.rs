//! User approval prompts raised by the wallet.
//!
//! A browser wallet pops up a confirmation for every connection and every
//! transaction. The connector and provider ask an [`ApprovalPrompt`] at the
//! same points; declining maps to [`BlockchainError::UserRejected`].
//!
//! [`BlockchainError::UserRejected`]: crate::blockchain::BlockchainError::UserRejected

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use std::fmt;

use crate::console;

/// What the wallet is asking the user to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalRequest {
    /// Expose `account` to the page.
    Connect { account: Address },
    /// Sign and broadcast a transaction.
    SendTransaction {
        from: Option<Address>,
        to: Option<Address>,
        value: U256,
    },
}

impl fmt::Display for ApprovalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalRequest::Connect { account } => {
                write!(f, "Connect account {} to the mint page?", account)
            }
            ApprovalRequest::SendTransaction { from, to, value } => {
                write!(f, "Send {} to ", format_ether(*value))?;
                match to {
                    Some(to) => write!(f, "{}", to)?,
                    None => write!(f, "a new contract")?,
                }
                if let Some(from) = from {
                    write!(f, " from {}", from)?;
                }
                write!(f, "?")
            }
        }
    }
}

/// Asks the user to approve a wallet request.
#[async_trait]
pub trait ApprovalPrompt: Send + Sync {
    async fn approve(&self, request: &ApprovalRequest) -> bool;
}

/// Approves everything (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

#[async_trait]
impl ApprovalPrompt for AutoApprove {
    async fn approve(&self, request: &ApprovalRequest) -> bool {
        tracing::debug!(request = %request, "Auto-approved wallet request");
        true
    }
}

/// Asks on the terminal and reads a y/N answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

#[async_trait]
impl ApprovalPrompt for ConsolePrompt {
    async fn approve(&self, request: &ApprovalRequest) -> bool {
        console::prompt(&format!("[wallet] {} [y/N] ", request));
        match console::read_line().await {
            Some(line) => is_affirmative(&line),
            None => {
                tracing::warn!("No answer to wallet prompt, treating as rejection");
                false
            }
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("no"));
    }

    #[test]
    fn test_request_display() {
        let request = ApprovalRequest::SendTransaction {
            from: None,
            to: Some(Address::ZERO),
            value: U256::from(10_000_000_000_000_000u64),
        };
        let text = request.to_string();
        assert!(text.starts_with("Send 0.01"));
        assert!(text.contains("0x0000000000000000000000000000000000000000"));
    }

    #[tokio::test]
    async fn test_auto_approve() {
        let request = ApprovalRequest::Connect {
            account: Address::ZERO,
        };
        assert!(AutoApprove.approve(&request).await);
    }
}
