pub mod client;
pub mod models;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::config::ChainDescriptor;
use crate::utils::address::Address;

pub use client::JsonRpcWallet;
pub use models::{ProviderError, ProviderEvent, TransactionReceipt, TransferRequest};

/// The external wallet: holds the keys, prompts the user, submits transfers
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Already-authorized accounts, without prompting
    async fn accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Ask the user to authorize accounts
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    async fn chain_id(&self) -> Result<u64, ProviderError>;

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError>;

    async fn add_chain(&self, chain: &ChainDescriptor) -> Result<(), ProviderError>;

    /// Sign and submit; returns the transaction hash
    async fn send_transaction(&self, from: &Address, request: &TransferRequest) -> Result<String, ProviderError>;

    /// Wait, without timeout, until the transaction is included
    async fn wait_for_receipt(&self, hash: &str) -> Result<TransactionReceipt, ProviderError>;

    /// Account and chain change notifications
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}
