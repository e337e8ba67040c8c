//! Scripted wallet for tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::models::{ProviderError, ProviderEvent, TransactionReceipt, TransferRequest};
use super::WalletProvider;
use crate::config::{ChainDescriptor, Config};
use crate::services::session_service::{self, Session};
use crate::utils::address::Address;

pub const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const BOB: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
pub const CAROL: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";
pub const DAVE: &str = "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb";

pub fn addr(s: &str) -> Address {
    s.parse().expect("test address")
}

#[derive(Debug, Default)]
pub struct MockState {
    pub accounts: Vec<Address>,
    pub authorized: bool,
    pub reject_accounts: bool,
    pub chain_id: u64,
    pub known_chains: Vec<u64>,
    pub reject_switch: bool,
    pub reject_add: bool,
    pub switch_calls: Vec<u64>,
    pub added_chains: Vec<u64>,
    /// Every submission attempt, in order
    pub attempts: usize,
    /// Successful submissions
    pub sent: Vec<(Address, TransferRequest)>,
    /// Fail the n-th (0-based) submission attempt with this error
    pub fail_send_at: Option<(usize, ProviderError)>,
    pub revert_receipts: bool,
}

pub struct MockWallet {
    pub state: Mutex<MockState>,
    events: broadcast::Sender<ProviderEvent>,
}

impl MockWallet {
    /// Wallet holding `account` on chain 1 that already knows chain 8080
    pub fn new(account: &str) -> Self {
        let (events, _) = broadcast::channel(8);
        Self {
            state: Mutex::new(MockState {
                accounts: vec![addr(account)],
                chain_id: 1,
                known_chains: vec![1, 8080],
                ..MockState::default()
            }),
            events,
        }
    }

    pub fn with<F: FnOnce(&mut MockState)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn sent(&self) -> Vec<(Address, TransferRequest)> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn emit(&self, event: ProviderEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let state = self.state.lock().unwrap();
        Ok(if state.authorized { state.accounts.clone() } else { Vec::new() })
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.reject_accounts {
            return Err(ProviderError::UserRejected);
        }
        state.authorized = true;
        Ok(state.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(self.state.lock().unwrap().chain_id)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        let mut state = self.state.lock().unwrap();
        state.switch_calls.push(chain_id);
        if state.reject_switch {
            return Err(ProviderError::UserRejected);
        }
        if !state.known_chains.contains(&chain_id) {
            return Err(ProviderError::UnrecognizedChain(chain_id));
        }
        state.chain_id = chain_id;
        Ok(())
    }

    async fn add_chain(&self, chain: &ChainDescriptor) -> Result<(), ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.reject_add {
            return Err(ProviderError::UserRejected);
        }
        state.known_chains.push(chain.chain_id);
        state.added_chains.push(chain.chain_id);
        Ok(())
    }

    async fn send_transaction(&self, from: &Address, request: &TransferRequest) -> Result<String, ProviderError> {
        let mut state = self.state.lock().unwrap();
        let attempt = state.attempts;
        state.attempts += 1;

        if let Some((index, error)) = &state.fail_send_at {
            if *index == attempt {
                return Err(error.clone());
            }
        }

        state.sent.push((*from, request.clone()));
        Ok(format!("0x{:064x}", attempt + 1))
    }

    async fn wait_for_receipt(&self, hash: &str) -> Result<TransactionReceipt, ProviderError> {
        let state = self.state.lock().unwrap();
        Ok(TransactionReceipt {
            transaction_hash: hash.to_string(),
            block_number: Some("0x1".to_string()),
            gas_used: Some("0x5208".to_string()),
            status: Some(if state.revert_receipts { "0x0" } else { "0x1" }.to_string()),
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}

/// Session connected through `wallet` with default configuration
pub async fn connected(wallet: MockWallet) -> (Arc<MockWallet>, Session, Config) {
    let wallet = Arc::new(wallet);
    let provider: Arc<dyn WalletProvider> = wallet.clone();
    let config = Config::default();
    let mut session = Session::new();
    session_service::connect(&mut session, Some(&provider), &config.chain)
        .await
        .expect("mock wallet connects");
    (wallet, session, config)
}
