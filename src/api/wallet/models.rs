use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ChainDescriptor;
use crate::utils::address::Address;
use crate::utils::units::{from_hex_quantity, to_hex_quantity};

/// Gas limit of a plain native-currency transfer
pub const NATIVE_TRANSFER_GAS: u64 = 21_000;

/// EIP-1193 error codes
pub const CODE_USER_REJECTED: i64 = 4001;
pub const CODE_UNRECOGNIZED_CHAIN: i64 = 4902;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Native-currency transfer handed to the wallet for signing
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub to: Address,
    /// Amount in base units
    pub value: u128,
    pub gas_limit: u64,
}

impl TransferRequest {
    pub fn native(to: Address, value: u128) -> Self {
        Self {
            to,
            value,
            gas_limit: NATIVE_TRANSFER_GAS,
        }
    }

    /// `eth_sendTransaction` parameter object
    pub fn to_rpc_params(&self, from: &Address) -> Value {
        json!([{
            "from": from.to_checksum(),
            "to": self.to.to_checksum(),
            "value": to_hex_quantity(self.value),
            "gas": to_hex_quantity(self.gas_limit as u128),
        }])
    }
}

/// Receipt returned once a transfer is included
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
    /// `0x1` success, `0x0` reverted
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() != Some("0x0")
    }

    pub fn gas_used(&self) -> Option<u128> {
        self.gas_used.as_deref().and_then(from_hex_quantity)
    }
}

/// `wallet_addEthereumChain` parameter object (EIP-3085)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl From<&ChainDescriptor> for AddChainParams {
    fn from(chain: &ChainDescriptor) -> Self {
        Self {
            chain_id: to_hex_quantity(chain.chain_id as u128),
            chain_name: chain.name.clone(),
            rpc_urls: vec![chain.rpc_url.clone()],
            native_currency: NativeCurrency {
                name: chain.currency_name.clone(),
                symbol: chain.currency_symbol.clone(),
                decimals: chain.decimals,
            },
            block_explorer_urls: vec![chain.explorer_url.clone()],
        }
    }
}

/// Account or network change reported by the wallet
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

/// Error type for wallet provider operations
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Wallet endpoint missing or unreachable
    Unavailable(String),
    /// 4001 User rejected the request
    UserRejected,
    /// 4902 Chain not added to the wallet
    UnrecognizedChain(u64),
    /// Sender cannot cover value + gas
    InsufficientFunds(String),
    /// Any other JSON-RPC error object
    Rpc { code: i64, message: String },
    /// Non-success HTTP status
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl ProviderError {
    /// Classify a JSON-RPC error object. `chain_id` is the chain a switch targeted, if any.
    pub fn from_rpc(error: RpcErrorObject, chain_id: Option<u64>) -> Self {
        match error.code {
            CODE_USER_REJECTED => ProviderError::UserRejected,
            CODE_UNRECOGNIZED_CHAIN => ProviderError::UnrecognizedChain(chain_id.unwrap_or_default()),
            _ if error.message.to_lowercase().contains("insufficient funds") => {
                ProviderError::InsufficientFunds(error.message)
            }
            code => ProviderError::Rpc {
                code,
                message: error.message,
            },
        }
    }

    /// Transport-level failure; the wallet never answered the call
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::Unavailable(_) | ProviderError::HttpError(..) | ProviderError::RequestError(_)
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Unavailable(msg) => write!(f, "Provider unavailable: {}", msg),
            ProviderError::UserRejected => write!(f, "User rejected the request"),
            ProviderError::UnrecognizedChain(id) => write!(f, "Unrecognized chain {}", id),
            ProviderError::InsufficientFunds(msg) => write!(f, "Insufficient funds: {}", msg),
            ProviderError::Rpc { code, message } => write!(f, "RPC Error ({}): {}", code, message),
            ProviderError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ProviderError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ProviderError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc_error(code: i64, message: &str) -> RpcErrorObject {
        RpcErrorObject {
            code,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_error_classification() {
        assert_eq!(ProviderError::from_rpc(rpc_error(4001, "denied"), None), ProviderError::UserRejected);
        assert_eq!(
            ProviderError::from_rpc(rpc_error(4902, "unknown"), Some(8080)),
            ProviderError::UnrecognizedChain(8080)
        );
        assert!(matches!(
            ProviderError::from_rpc(rpc_error(-32000, "insufficient funds for gas * price + value"), None),
            ProviderError::InsufficientFunds(_)
        ));
        assert!(matches!(
            ProviderError::from_rpc(rpc_error(-32603, "internal"), None),
            ProviderError::Rpc { code: -32603, .. }
        ));
    }

    #[test]
    fn test_transient_errors() {
        assert!(ProviderError::HttpError(502, "Bad Gateway".into()).is_transient());
        assert!(ProviderError::RequestError("connection reset".into()).is_transient());
        assert!(ProviderError::Unavailable("refused".into()).is_transient());
        assert!(!ProviderError::UserRejected.is_transient());
        assert!(!ProviderError::Rpc { code: -32000, message: "unknown transaction".into() }.is_transient());
    }

    #[test]
    fn test_transfer_params() {
        let from: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        let to: Address = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359".parse().unwrap();
        let params = TransferRequest::native(to, 1_000_000_000_000_000_000).to_rpc_params(&from);

        assert_eq!(params[0]["to"], "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359");
        assert_eq!(params[0]["value"], "0xde0b6b3a7640000");
        assert_eq!(params[0]["gas"], "0x5208");
    }

    #[test]
    fn test_add_chain_params() {
        let params = AddChainParams::from(&ChainDescriptor::shardeum_sphinx());
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["chainId"], "0x1f90");
        assert_eq!(json["nativeCurrency"]["symbol"], "SHM");
        assert_eq!(json["rpcUrls"][0], "https://sphinx.shardeum.org/");
    }

    #[test]
    fn test_receipt_status() {
        let receipt: TransactionReceipt =
            serde_json::from_str(r#"{"transactionHash":"0x1","status":"0x0","gasUsed":"0x5208"}"#).unwrap();
        assert!(!receipt.succeeded());
        assert_eq!(receipt.gas_used(), Some(21000));
    }
}
