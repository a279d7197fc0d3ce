//! Wallet and chain access.
//!
//! # Data Flow
//! ```text
//! connector.rs (locate wallet, approve connection)
//!     → ProviderHandle (rpc.rs in production)
//!     → client.rs (read or read/write Capability, network identity)
//!     → guard.rs (required chain ID, fails closed)
//!     → contract.rs (totalSupply / mint)
//!     → transaction.rs (receipt polling until confirmed)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys
//! - All RPC calls have configurable timeouts

pub mod approval;
pub mod client;
pub mod connector;
pub mod contract;
pub mod guard;
pub mod rpc;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use approval::{ApprovalPrompt, ApprovalRequest, AutoApprove, ConsolePrompt};
pub use client::Capability;
pub use connector::{EnvWalletConnector, ProviderHandle, RawProvider, WalletConnector};
pub use contract::{NftContract, PendingMint};
pub use transaction::ConfirmationPolicy;
pub use types::{
    BlockchainError, BlockchainResult, ChainId, ConfirmationStatus, Network, ReceiptSummary,
};
pub use wallet::Wallet;
