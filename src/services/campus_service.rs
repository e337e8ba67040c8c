use sqlx::sqlite::SqlitePool;
use tracing::info;

use crate::api::wallet::TransferRequest;
use crate::config::Config;
use crate::db;
use crate::models::{TransactionRecord, TransactionType};
use crate::services::session_service::Session;
use crate::services::transfer_service;
use crate::utils::errors::PayError;

/// Pay the campus treasury for `item`
pub async fn buy_item(
    pool: &SqlitePool,
    session: &Session,
    config: &Config,
    item: &str,
    price: f64,
) -> Result<TransactionRecord, PayError> {
    let signer = session.signer()?;

    let item = item.trim();
    if item.is_empty() {
        return Err(PayError::validation("item", "item name is required"));
    }
    let value = transfer_service::validate_amount("price", price, config.chain.decimals)?;

    let transfer = TransferRequest::native(config.campus_treasury, value);
    let confirmed = transfer_service::submit(signer, &transfer).await?;

    let mut record = TransactionRecord::new(
        TransactionType::CampusPurchase,
        confirmed.hash,
        price,
        *signer.address(),
        confirmed.timestamp,
    );
    record.item = Some(item.to_string());

    db::ledger::append(pool, &record).await?;
    info!("Purchased '{}' for {} {}", item, price, config.chain.currency_symbol);

    Ok(record)
}
