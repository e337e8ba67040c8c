use sqlx::sqlite::SqlitePool;
use tracing::info;

use crate::api::wallet::TransferRequest;
use crate::config::Config;
use crate::db;
use crate::models::{TransactionRecord, TransactionType};
use crate::services::session_service::Session;
use crate::services::transfer_service;
use crate::utils::errors::PayError;

pub struct TipRequest<'a> {
    pub recipient: &'a str,
    pub amount: f64,
    pub message: Option<String>,
}

pub struct TipResult {
    pub record: TransactionRecord,
    pub gas_used: Option<u128>,
}

/// Send a direct tip and record it
pub async fn send_tip(
    pool: &SqlitePool,
    session: &Session,
    config: &Config,
    request: TipRequest<'_>,
) -> Result<TipResult, PayError> {
    let signer = session.signer()?;

    let value = transfer_service::validate_amount("amount", request.amount, config.chain.decimals)?;
    let recipient = transfer_service::validate_address("recipient", request.recipient)?;

    let transfer = TransferRequest::native(recipient, value);
    let confirmed = transfer_service::submit(signer, &transfer).await?;

    let mut record = TransactionRecord::new(
        TransactionType::Tip,
        confirmed.hash,
        request.amount,
        *signer.address(),
        confirmed.timestamp,
    );
    record.recipient = Some(recipient);
    record.message = request.message.filter(|m| !m.trim().is_empty());

    db::ledger::append(pool, &record).await?;
    info!("Tip of {} {} sent to {}", request.amount, config.chain.currency_symbol, recipient);

    Ok(TipResult {
        record,
        gas_used: confirmed.gas_used,
    })
}
