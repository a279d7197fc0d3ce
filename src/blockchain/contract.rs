//! Binding for the public-mint NFT contract.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::client::Capability;
use crate::blockchain::connector::ProviderHandle;
use crate::blockchain::transaction::{wait_for_confirmation, ConfirmationPolicy};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};

sol! {
    /// The slice of the collection's interface the mint page calls.
    interface PublicMintNft {
        /// Number of tokens minted so far.
        function totalSupply() external view returns (uint256);

        /// Mint one token to the caller, paying the price as value.
        function mint() external payable;
    }
}

/// The NFT contract bound to a capability.
#[derive(Debug, Clone)]
pub struct NftContract {
    address: Address,
    capability: Capability,
}

impl NftContract {
    pub fn bind(address: Address, capability: Capability) -> Self {
        Self {
            address,
            capability,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// The same contract over a read-only capability.
    pub fn read_only(&self) -> Self {
        Self::bind(self.address, self.capability.read_only())
    }

    /// Number of tokens issued so far (`totalSupply()`).
    pub async fn read_token_count(&self) -> BlockchainResult<u64> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(PublicMintNft::totalSupplyCall {}.abi_encode());

        let output = self.capability.handle().call(tx).await?;
        let supply: U256 = PublicMintNft::totalSupplyCall::abi_decode_returns(&output)
            .map_err(|e| BlockchainError::Decode(format!("totalSupply(): {}", e)))?;

        u64::try_from(supply)
            .map_err(|_| BlockchainError::Decode(format!("totalSupply() {} overflows u64", supply)))
    }

    /// Submit `mint()` paying `value`. Requires a signer capability.
    pub async fn mint(&self, value: U256) -> BlockchainResult<PendingMint> {
        let from = self.capability.signer().ok_or(BlockchainError::MissingSigner)?;

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(self.address)
            .with_value(value)
            .with_input(PublicMintNft::mintCall {}.abi_encode());

        let tx_hash = self.capability.handle().send_transaction(tx).await?;
        tracing::info!(tx_hash = %tx_hash, from = %from, value = %value, "Mint transaction submitted");

        Ok(PendingMint {
            tx_hash,
            handle: self.capability.handle().clone(),
        })
    }
}

/// A submitted mint awaiting confirmation.
pub struct PendingMint {
    tx_hash: TxHash,
    handle: ProviderHandle,
}

impl PendingMint {
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Wait until the mint is confirmed or fails.
    pub async fn confirmation(self, policy: ConfirmationPolicy) -> BlockchainResult<ConfirmationStatus> {
        wait_for_confirmation(self.handle.as_ref(), self.tx_hash, policy).await
    }
}

impl std::fmt::Debug for PendingMint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingMint")
            .field("tx_hash", &self.tx_hash)
            .finish()
    }
}
