use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::models::{
    AddChainParams, ProviderError, ProviderEvent, RpcRequest, RpcResponse, TransactionReceipt,
    TransferRequest,
};
use super::WalletProvider;
use crate::config::ChainDescriptor;
use crate::utils::address::Address;
use crate::utils::rpc_ratelimit::rate_limit_rpc;
use crate::utils::units::{from_hex_quantity, to_hex_quantity};

/// Wallet reached over JSON-RPC 2.0 / HTTP, speaking the EIP-1193 method set
pub struct JsonRpcWallet {
    http_client: HttpClient,
    endpoint: String,
    next_id: AtomicU64,
    receipt_poll: Duration,
    events: broadcast::Sender<ProviderEvent>,
}

impl JsonRpcWallet {
    pub fn new(endpoint: String, receipt_poll: Duration) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            http_client: HttpClient::new(),
            endpoint,
            next_id: AtomicU64::new(1),
            receipt_poll,
            events,
        }
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Issue one JSON-RPC call and decode its `result`
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        chain_hint: Option<u64>,
    ) -> Result<T, ProviderError> {
        rate_limit_rpc().await;

        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("RPC -> {} (id {})", method, request.id);

        let response = self
            .http_client
            .post(&self.endpoint)
            .headers(Self::create_headers())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::Unavailable(format!("{}: {}", self.endpoint, e))
                } else {
                    ProviderError::RequestError(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Wallet returned HTTP {} for {}: {}", status.as_u16(), method, body);
            return Err(ProviderError::HttpError(status.as_u16(), body));
        }

        let envelope = response
            .json::<RpcResponse>()
            .await
            .map_err(|e| ProviderError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = envelope.error {
            debug!("RPC <- {} error {}: {}", method, error.code, error.message);
            return Err(ProviderError::from_rpc(error, chain_hint));
        }

        serde_json::from_value(envelope.result.unwrap_or(Value::Null))
            .map_err(|e| ProviderError::DeserializationError(format!("Unexpected {} result: {}", method, e)))
    }

    /// Poll `eth_accounts` and `eth_chainId` every `interval`, publishing changes
    pub fn spawn_watcher(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let wallet = Arc::clone(self);
        tokio::spawn(async move {
            let mut seen = WatchState::default();

            loop {
                tokio::time::sleep(interval).await;

                match wallet.accounts().await {
                    Ok(accounts) => {
                        if let Some(event) = seen.observe_accounts(accounts) {
                            wallet.publish(event);
                        }
                    }
                    Err(e) => debug!("Watcher could not read accounts: {}", e),
                }

                match wallet.chain_id().await {
                    Ok(chain_id) => {
                        if let Some(event) = seen.observe_chain(chain_id) {
                            wallet.publish(event);
                        }
                    }
                    Err(e) => debug!("Watcher could not read chain id: {}", e),
                }
            }
        })
    }

    fn publish(&self, event: ProviderEvent) {
        if let Err(e) = self.events.send(event) {
            debug!("No listener for wallet event {:?}", e.0);
        }
    }
}

/// Last values seen by the watcher. The first observation only sets the
/// baseline; later differences become events.
#[derive(Debug, Default)]
struct WatchState {
    accounts: Option<Vec<Address>>,
    chain: Option<u64>,
}

impl WatchState {
    fn observe_accounts(&mut self, accounts: Vec<Address>) -> Option<ProviderEvent> {
        let changed = self.accounts.as_ref().is_some_and(|prev| *prev != accounts);
        let event = changed.then(|| ProviderEvent::AccountsChanged(accounts.clone()));
        self.accounts = Some(accounts);
        event
    }

    fn observe_chain(&mut self, chain_id: u64) -> Option<ProviderEvent> {
        let changed = self.chain.is_some_and(|prev| prev != chain_id);
        self.chain = Some(chain_id);
        changed.then_some(ProviderEvent::ChainChanged(chain_id))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.call("eth_accounts", json!([]), None).await
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.call("eth_requestAccounts", json!([]), None).await
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let raw: String = self.call("eth_chainId", json!([]), None).await?;
        from_hex_quantity(&raw)
            .and_then(|id| u64::try_from(id).ok())
            .ok_or_else(|| ProviderError::DeserializationError(format!("Bad chain id {}", raw)))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        let params = json!([{ "chainId": to_hex_quantity(chain_id as u128) }]);
        let _: Value = self
            .call("wallet_switchEthereumChain", params, Some(chain_id))
            .await?;
        Ok(())
    }

    async fn add_chain(&self, chain: &ChainDescriptor) -> Result<(), ProviderError> {
        let params = json!([AddChainParams::from(chain)]);
        let _: Value = self
            .call("wallet_addEthereumChain", params, Some(chain.chain_id))
            .await?;
        Ok(())
    }

    async fn send_transaction(&self, from: &Address, request: &TransferRequest) -> Result<String, ProviderError> {
        self.call("eth_sendTransaction", request.to_rpc_params(from), None).await
    }

    async fn wait_for_receipt(&self, hash: &str) -> Result<TransactionReceipt, ProviderError> {
        loop {
            let receipt: Result<Option<TransactionReceipt>, ProviderError> = self
                .call("eth_getTransactionReceipt", json!([hash]), None)
                .await;

            match receipt {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => {}
                Err(e) if e.is_transient() => debug!("Receipt poll for {} failed, retrying: {}", hash, e),
                Err(e) => return Err(e),
            }

            tokio::time::sleep(self.receipt_poll).await;
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}
