//! Submit-and-confirm shared by every paying flow

use tracing::{info, warn};

use crate::api::wallet::{ProviderError, TransferRequest};
use crate::services::session_service::Signer;
use crate::utils::address::Address;
use crate::utils::errors::PayError;
use crate::utils::units::parse_units;

/// A transfer the network has included
#[derive(Debug, Clone)]
pub struct ConfirmedTransfer {
    pub hash: String,
    pub gas_used: Option<u128>,
    /// Epoch milliseconds at confirmation
    pub timestamp: i64,
}

/// Check `amount > 0` and convert it to base units
pub fn validate_amount(field: &'static str, amount: f64, decimals: u8) -> Result<u128, PayError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PayError::validation(field, "must be greater than zero"));
    }
    parse_units(amount, decimals).map_err(|e| PayError::validation(field, e.to_string()))
}

/// Parse a recipient address, mapping failures to the flow taxonomy
pub fn validate_address(field: &'static str, input: &str) -> Result<Address, PayError> {
    if input.trim().is_empty() {
        return Err(PayError::validation(field, "address is required"));
    }
    input.parse().map_err(|e| PayError::from_address(field, e))
}

/// Submit one native transfer and wait for its receipt
pub async fn submit(signer: &Signer, request: &TransferRequest) -> Result<ConfirmedTransfer, PayError> {
    let pending = signer.send_transaction(request).await.map_err(transfer_error)?;
    info!("Transfer {} submitted to {}, awaiting receipt", pending.hash, request.to);

    let receipt = pending.wait().await.map_err(transfer_error)?;
    if !receipt.succeeded() {
        warn!("Transfer {} reverted", pending.hash);
        return Err(PayError::TransferFailed {
            reason: format!("transaction {} reverted", pending.hash),
        });
    }

    info!(
        "Transfer {} confirmed (gas used: {})",
        pending.hash,
        receipt.gas_used().map(|g| g.to_string()).unwrap_or_else(|| "unknown".to_string())
    );

    Ok(ConfirmedTransfer {
        gas_used: receipt.gas_used(),
        hash: pending.hash,
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

fn transfer_error(error: ProviderError) -> PayError {
    match error {
        ProviderError::UserRejected => PayError::UserRejected,
        ProviderError::InsufficientFunds(_) => PayError::InsufficientFunds,
        other => {
            warn!("Transfer failed: {}", other);
            PayError::TransferFailed {
                reason: other.to_string(),
            }
        }
    }
}
