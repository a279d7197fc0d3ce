//! Chain-specific types and error definitions.

use std::fmt;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Polygon Mumbai testnet, the network the mint page targets.
pub const MUMBAI: ChainId = ChainId(80001);

/// Network identity as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    pub chain_id: ChainId,
}

/// Errors that can occur during wallet and chain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// No wallet (signing key) is available to connect.
    #[error("No wallet found: {0}")]
    NoWalletFound(String),

    /// The user declined a connection or transaction prompt.
    #[error("User rejected the request: {0}")]
    UserRejected(String),

    /// The provider is connected to a chain other than the required one.
    #[error("Wrong network: expected chain ID {expected}, got {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    /// The account cannot pay for the transaction value plus gas.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// A write operation was attempted on a read-only capability.
    #[error("Capability has no signer attached")]
    MissingSigner,

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within expected time.
    #[error("Transaction not confirmed with {0} confirmations before the deadline")]
    ConfirmationTimeout(u32),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Contract return data could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl BlockchainError {
    /// Classify an error reported by the chain client.
    ///
    /// Nodes and wallets only report these conditions as text (plus the
    /// EIP-1193 code 4001 for rejections), so classification is by message.
    pub fn from_rpc(err: impl fmt::Display) -> Self {
        let message = err.to_string();
        let lower = message.to_lowercase();
        if lower.contains("insufficient funds") {
            Self::InsufficientFunds(message)
        } else if lower.contains("user rejected")
            || lower.contains("user denied")
            || has_rejection_code(&lower)
        {
            Self::UserRejected(message)
        } else {
            Self::Rpc(message)
        }
    }
}

/// EIP-1193 `4001` as an error code (`code 4001`, `code: 4001`,
/// `"code":4001`), not as digits inside some other number.
fn has_rejection_code(lower: &str) -> bool {
    lower.match_indices("code").any(|(at, key)| {
        let rest = lower[at + key.len()..]
            .trim_start_matches(|c: char| c == ':' || c == '=' || c == '"' || c.is_whitespace());
        rest.starts_with("4001") && !rest[4..].starts_with(|c: char| c.is_ascii_digit())
    })
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is pending in mempool.
    Pending,
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u32, required: u32 },
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
    /// Transaction failed or was dropped.
    Failed(String),
}

/// The part of a transaction receipt the mint flow needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    /// Execution succeeded (status 1).
    pub success: bool,
    /// Block the transaction was included in.
    pub block_number: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(80001u64);
        assert_eq!(chain_id, MUMBAI);
        assert_eq!(u64::from(chain_id), 80001);
        assert_eq!(chain_id.to_string(), "80001");
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::WrongNetwork {
            expected: 80001,
            actual: 1,
        };
        assert_eq!(err.to_string(), "Wrong network: expected chain ID 80001, got 1");
    }

    #[test]
    fn test_rpc_classification() {
        let err = BlockchainError::from_rpc(
            "server returned an error response: error code -32000: insufficient funds for gas * price + value",
        );
        assert!(matches!(err, BlockchainError::InsufficientFunds(_)));

        let err = BlockchainError::from_rpc("error code 4001: User rejected the request.");
        assert!(matches!(err, BlockchainError::UserRejected(_)));

        let err = BlockchainError::from_rpc("connection refused");
        assert!(matches!(err, BlockchainError::Rpc(ref m) if m == "connection refused"));
    }

    #[test]
    fn test_rejection_code_is_matched_as_a_code() {
        let err = BlockchainError::from_rpc("nonce too low: next nonce 14001, tx nonce 3");
        assert!(matches!(err, BlockchainError::Rpc(_)));

        let err = BlockchainError::from_rpc("error code 40012: something else");
        assert!(matches!(err, BlockchainError::Rpc(_)));

        let err = BlockchainError::from_rpc(r#"{"code":4001,"message":"Request declined"}"#);
        assert!(matches!(err, BlockchainError::UserRejected(_)));

        let err = BlockchainError::from_rpc("wallet error, code: 4001");
        assert!(matches!(err, BlockchainError::UserRejected(_)));
    }
}
