use thiserror::Error;

use crate::utils::address::AddressError;

/// Errors surfaced by sessions and payment flows
#[derive(Debug, Error)]
pub enum PayError {
    #[error("Wallet not connected")]
    NotConnected,
    #[error("Wallet provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Request rejected by user")]
    UserRejected,
    #[error("Failed to switch network: {0}")]
    ChainSwitchFailed(String),
    #[error("Failed to add network: {0}")]
    ChainAddFailed(String),
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Name service addresses are not supported: {0}")]
    UnsupportedNameService(String),
    #[error("Insufficient funds for this transaction")]
    InsufficientFunds,
    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },
    #[error("Invalid ledger record: {0}")]
    InvalidRecord(String),
    #[error("Bill split stopped after {completed} of {total} transfers: {cause}")]
    SplitIncomplete {
        completed: usize,
        total: usize,
        #[source]
        cause: Box<PayError>,
    },
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PayError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        PayError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Map an address parse failure onto the flow taxonomy for `field`
    pub fn from_address(field: &'static str, error: AddressError) -> Self {
        match error {
            AddressError::NameService(name) => PayError::UnsupportedNameService(name),
            other => PayError::validation(field, other.to_string()),
        }
    }

    /// User-facing status line, keyed by the native currency symbol
    pub fn status_message(&self, symbol: &str) -> String {
        match self {
            PayError::NotConnected => "Please connect your wallet first".to_string(),
            PayError::ProviderUnavailable(_) => {
                "No wallet provider detected. Set PAYFI_WALLET_RPC_URL to your wallet's RPC endpoint".to_string()
            }
            PayError::UserRejected => "Transaction cancelled by user".to_string(),
            PayError::InsufficientFunds => {
                format!("Insufficient {} balance for this transaction", symbol)
            }
            PayError::UnsupportedNameService(_) => {
                "Name service addresses are not supported on this network".to_string()
            }
            PayError::SplitIncomplete {
                completed,
                total,
                cause,
            } => format!(
                "Bill split stopped after {} of {} payments ({}). Completed payments are in your history",
                completed,
                total,
                cause.status_message(symbol)
            ),
            other => extract_clean_error(&other.to_string()),
        }
    }
}

impl From<sqlx::Error> for PayError {
    fn from(e: sqlx::Error) -> Self {
        PayError::Storage(extract_clean_error(&e.to_string()))
    }
}

/// Extract clean error message from database error strings
///
/// Removes technical error codes and prefixes like:
/// "error returned from database: (code: 5) database is locked"
///
/// Returns only the meaningful error message:
/// "database is locked"
pub fn extract_clean_error(error_msg: &str) -> String {
    if let Some(rest) = error_msg.strip_prefix("error returned from database: ") {
        let rest = rest.trim();
        if rest.starts_with("(code:") {
            if let Some(close) = rest.find(')') {
                return rest[close + 1..].trim().to_string();
            }
        }
        rest.to_string()
    } else {
        error_msg.to_string()
    }
}
