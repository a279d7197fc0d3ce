//! Chain client facade over a connected provider.
//!
//! Wraps a raw [`ProviderHandle`] into a read-only or read/write
//! [`Capability`] and reads the network identity.

use alloy::primitives::Address;

use crate::blockchain::connector::ProviderHandle;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, Network};

/// Read-only or read/write access to chain state.
#[derive(Clone)]
pub enum Capability {
    /// Can query state.
    Provider(ProviderHandle),
    /// Can query state and send transactions from `account`.
    Signer {
        handle: ProviderHandle,
        account: Address,
    },
}

impl Capability {
    /// Wrap a provider handle.
    ///
    /// With `needs_signer`, the first account the wallet exposes becomes the
    /// signing identity; a wallet exposing none fails with `MissingSigner`.
    pub fn wrap(handle: ProviderHandle, needs_signer: bool) -> BlockchainResult<Self> {
        if !needs_signer {
            return Ok(Self::Provider(handle));
        }

        let account = handle
            .accounts()
            .first()
            .copied()
            .ok_or(BlockchainError::MissingSigner)?;
        Ok(Self::Signer { handle, account })
    }

    /// Read the network the provider is connected to.
    pub async fn get_network(&self) -> BlockchainResult<Network> {
        let chain_id = self.handle().chain_id().await?;
        Ok(Network {
            chain_id: ChainId(chain_id),
        })
    }

    /// The underlying provider handle.
    pub fn handle(&self) -> &ProviderHandle {
        match self {
            Self::Provider(handle) => handle,
            Self::Signer { handle, .. } => handle,
        }
    }

    /// The signing account, if any.
    pub fn signer(&self) -> Option<Address> {
        match self {
            Self::Provider(_) => None,
            Self::Signer { account, .. } => Some(*account),
        }
    }

    /// A read-only capability over the same handle.
    pub fn read_only(&self) -> Self {
        Self::Provider(self.handle().clone())
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(_) => f.debug_tuple("Provider").finish(),
            Self::Signer { account, .. } => {
                f.debug_struct("Signer").field("account", account).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::connector::RawProvider;
    use crate::blockchain::types::ReceiptSummary;
    use alloy::primitives::{Bytes, TxHash};
    use alloy::rpc::types::TransactionRequest;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubProvider {
        accounts: Vec<Address>,
    }

    #[async_trait]
    impl RawProvider for StubProvider {
        fn accounts(&self) -> Vec<Address> {
            self.accounts.clone()
        }
        async fn chain_id(&self) -> BlockchainResult<u64> {
            Ok(80001)
        }
        async fn block_number(&self) -> BlockchainResult<u64> {
            Ok(1)
        }
        async fn call(&self, _tx: TransactionRequest) -> BlockchainResult<Bytes> {
            Ok(Bytes::new())
        }
        async fn send_transaction(&self, _tx: TransactionRequest) -> BlockchainResult<TxHash> {
            Ok(TxHash::ZERO)
        }
        async fn transaction_status(&self, _tx: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
            Ok(None)
        }
    }

    fn handle(accounts: Vec<Address>) -> ProviderHandle {
        Arc::new(StubProvider { accounts })
    }

    #[test]
    fn test_wrap_read_only() {
        let capability = Capability::wrap(handle(vec![]), false).unwrap();
        assert!(capability.signer().is_none());
    }

    #[test]
    fn test_wrap_signer_uses_first_account() {
        let first = Address::repeat_byte(1);
        let capability = Capability::wrap(handle(vec![first, Address::repeat_byte(2)]), true).unwrap();
        assert_eq!(capability.signer(), Some(first));
        assert!(capability.read_only().signer().is_none());
    }

    #[test]
    fn test_signer_without_accounts() {
        let result = Capability::wrap(handle(vec![]), true);
        assert!(matches!(result, Err(BlockchainError::MissingSigner)));
    }

    #[tokio::test]
    async fn test_get_network() {
        let capability = Capability::wrap(handle(vec![]), false).unwrap();
        let network = capability.get_network().await.unwrap();
        assert_eq!(network.chain_id, ChainId(80001));
    }
}
