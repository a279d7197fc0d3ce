//! Network guard: the page only works against one chain.

use crate::blockchain::client::Capability;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};

/// Fail with `WrongNetwork` unless `chain_id` is `required`.
pub fn assert_network(chain_id: ChainId, required: ChainId) -> BlockchainResult<()> {
    if chain_id != required {
        return Err(BlockchainError::WrongNetwork {
            expected: required.0,
            actual: chain_id.0,
        });
    }
    Ok(())
}

/// Read the capability's network and hand the capability back only if it is
/// on the required chain.
pub async fn guard(capability: Capability, required: ChainId) -> BlockchainResult<Capability> {
    let network = capability.get_network().await?;
    if let Err(e) = assert_network(network.chain_id, required) {
        tracing::warn!(
            chain_id = %network.chain_id,
            required = %required,
            "Wallet is connected to the wrong network"
        );
        return Err(e);
    }
    Ok(capability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::MUMBAI;

    #[test]
    fn test_required_network_passes() {
        assert!(assert_network(ChainId(80001), MUMBAI).is_ok());
    }

    #[test]
    fn test_any_other_network_fails() {
        for id in [0u64, 1, 137, 31337, 80000, 80002, u64::MAX] {
            let err = assert_network(ChainId(id), MUMBAI).unwrap_err();
            assert!(matches!(
                err,
                BlockchainError::WrongNetwork { expected: 80001, actual } if actual == id
            ));
        }
    }
}
