//! Wallet session: connected account plus the signing handle every payment
//! flow goes through.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::wallet::{ProviderError, ProviderEvent, TransactionReceipt, TransferRequest, WalletProvider};
use crate::config::ChainDescriptor;
use crate::services::chain_service;
use crate::utils::address::Address;
use crate::utils::errors::PayError;

/// Capability to submit transfers from one authorized account
#[derive(Clone)]
pub struct Signer {
    provider: Arc<dyn WalletProvider>,
    address: Address,
}

impl Signer {
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub async fn send_transaction(&self, request: &TransferRequest) -> Result<PendingTransfer, ProviderError> {
        let hash = self.provider.send_transaction(&self.address, request).await?;
        Ok(PendingTransfer {
            hash,
            provider: Arc::clone(&self.provider),
        })
    }
}

/// A submitted transfer awaiting inclusion
pub struct PendingTransfer {
    pub hash: String,
    provider: Arc<dyn WalletProvider>,
}

impl PendingTransfer {
    pub async fn wait(&self) -> Result<TransactionReceipt, ProviderError> {
        self.provider.wait_for_receipt(&self.hash).await
    }
}

#[derive(Default)]
pub struct Session {
    account: Option<Address>,
    signer: Option<Signer>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some() && self.signer.is_some()
    }

    /// Signing handle, or `NotConnected`
    pub fn signer(&self) -> Result<&Signer, PayError> {
        match (&self.account, &self.signer) {
            (Some(_), Some(signer)) => Ok(signer),
            _ => Err(PayError::NotConnected),
        }
    }

    pub fn disconnect(&mut self) {
        self.account = None;
        self.signer = None;
    }

    fn bind(&mut self, provider: Arc<dyn WalletProvider>, address: Address) {
        self.account = Some(address);
        self.signer = Some(Signer { provider, address });
    }
}

/// Request accounts, activate `chain`, then bind the session.
///
/// The session is left untouched when any step fails.
pub async fn connect(
    session: &mut Session,
    provider: Option<&Arc<dyn WalletProvider>>,
    chain: &ChainDescriptor,
) -> Result<Address, PayError> {
    let provider = provider.ok_or_else(|| PayError::ProviderUnavailable("no wallet configured".to_string()))?;

    let accounts = provider.request_accounts().await.map_err(|e| match e {
        ProviderError::UserRejected => PayError::UserRejected,
        other => {
            warn!("Account request failed: {}", other);
            PayError::ProviderUnavailable(other.to_string())
        }
    })?;

    let address = *accounts.first().ok_or(PayError::UserRejected)?;

    chain_service::ensure_chain(&**provider, chain).await?;

    session.bind(Arc::clone(provider), address);
    info!("Wallet connected: {} on {}", address, chain.name);
    Ok(address)
}

/// Reconnect at start-up when the wallet already authorized an account
pub async fn restore(
    session: &mut Session,
    provider: Option<&Arc<dyn WalletProvider>>,
    chain: &ChainDescriptor,
) -> Result<Option<Address>, PayError> {
    let Some(wallet) = provider else {
        return Ok(None);
    };

    let accounts = wallet
        .accounts()
        .await
        .map_err(|e| PayError::ProviderUnavailable(e.to_string()))?;

    if accounts.is_empty() {
        return Ok(None);
    }

    connect(session, provider, chain).await.map(Some)
}

/// Apply a wallet notification. Returns a status line when the session changed.
pub fn handle_event(session: &mut Session, event: &ProviderEvent, chain: &ChainDescriptor) -> Option<String> {
    if !session.is_connected() {
        return None;
    }

    match event {
        ProviderEvent::AccountsChanged(accounts) => match accounts.first() {
            None => {
                session.disconnect();
                info!("Wallet removed all accounts, session cleared");
                Some("Wallet disconnected".to_string())
            }
            Some(&address) if session.account() != Some(&address) => {
                let provider = session.signer.as_ref().map(|s| Arc::clone(&s.provider))?;
                session.bind(provider, address);
                info!("Active account changed to {}", address);
                Some(format!("Switched to account {}", address.short()))
            }
            Some(_) => None,
        },
        ProviderEvent::ChainChanged(chain_id) if *chain_id != chain.chain_id => {
            session.disconnect();
            warn!("Wallet moved to chain {}, session cleared", chain_id);
            Some(format!(
                "Wallet switched away from {}. Reconnect to continue",
                chain.name
            ))
        }
        ProviderEvent::ChainChanged(_) => None,
    }
}

/// One-line session summary
pub fn status(session: &Session, chain: &ChainDescriptor) -> String {
    match session.account() {
        Some(address) => format!("Connected: {} on {}", address.short(), chain.name),
        None => "Disconnected".to_string(),
    }
}
