use tracing::{info, warn};

use crate::api::wallet::{ProviderError, WalletProvider};
use crate::config::ChainDescriptor;
use crate::utils::errors::PayError;

/// Make `chain` the wallet's active network, adding it first if the wallet
/// does not know it yet.
pub async fn ensure_chain(provider: &dyn WalletProvider, chain: &ChainDescriptor) -> Result<(), PayError> {
    match provider.switch_chain(chain.chain_id).await {
        Ok(()) => {
            info!("Active network is {} ({})", chain.name, chain.chain_id);
            Ok(())
        }
        Err(ProviderError::UnrecognizedChain(_)) => {
            info!("Wallet does not know chain {}, requesting add", chain.chain_id);

            provider.add_chain(chain).await.map_err(|e| {
                warn!("Add-chain request for {} failed: {}", chain.chain_id, e);
                PayError::ChainAddFailed(e.to_string())
            })?;

            provider
                .switch_chain(chain.chain_id)
                .await
                .map_err(|e| switch_error(chain, e))?;

            info!("Added and switched to {} ({})", chain.name, chain.chain_id);
            Ok(())
        }
        Err(e) => Err(switch_error(chain, e)),
    }
}

fn switch_error(chain: &ChainDescriptor, error: ProviderError) -> PayError {
    warn!("Switch to chain {} failed: {}", chain.chain_id, error);
    match error {
        ProviderError::Unavailable(msg) => PayError::ProviderUnavailable(msg),
        other => PayError::ChainSwitchFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wallet::mock::{MockWallet, ALICE};

    #[tokio::test]
    async fn test_known_chain_switches_directly() {
        let wallet = MockWallet::new(ALICE);
        ensure_chain(&wallet, &ChainDescriptor::shardeum_sphinx()).await.unwrap();

        let state = wallet.state.lock().unwrap();
        assert_eq!(state.switch_calls, vec![8080]);
        assert!(state.added_chains.is_empty());
        assert_eq!(state.chain_id, 8080);
    }

    #[tokio::test]
    async fn test_unknown_chain_is_added_then_switched() {
        let wallet = MockWallet::new(ALICE).with(|s| s.known_chains = vec![1]);
        ensure_chain(&wallet, &ChainDescriptor::shardeum_sphinx()).await.unwrap();

        let state = wallet.state.lock().unwrap();
        assert_eq!(state.added_chains, vec![8080]);
        assert_eq!(state.switch_calls, vec![8080, 8080]);
        assert_eq!(state.chain_id, 8080);
    }

    #[tokio::test]
    async fn test_rejected_add_fails() {
        let wallet = MockWallet::new(ALICE).with(|s| {
            s.known_chains = vec![1];
            s.reject_add = true;
        });
        let result = ensure_chain(&wallet, &ChainDescriptor::shardeum_sphinx()).await;
        assert!(matches!(result, Err(PayError::ChainAddFailed(_))));
    }

    #[tokio::test]
    async fn test_rejected_switch_fails() {
        let wallet = MockWallet::new(ALICE).with(|s| s.reject_switch = true);
        let result = ensure_chain(&wallet, &ChainDescriptor::shardeum_sphinx()).await;
        assert!(matches!(result, Err(PayError::ChainSwitchFailed(_))));
    }
}
