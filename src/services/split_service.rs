use sqlx::sqlite::SqlitePool;
use tracing::{error, info};

use crate::api::wallet::TransferRequest;
use crate::config::Config;
use crate::db;
use crate::models::{RecipientList, TransactionRecord, TransactionType};
use crate::services::session_service::Session;
use crate::services::transfer_service;
use crate::utils::errors::PayError;
use crate::utils::units::parse_units_floor;

pub struct SplitResult {
    pub records: Vec<TransactionRecord>,
    pub amount_per_person: f64,
}

/// Pay `total / n` to each recipient, one confirmed transfer at a time.
///
/// Transfers are not atomic: when one fails, the earlier ones stay confirmed
/// and recorded, the rest are never sent, and the recipient list is kept.
/// The share is not corrected for rounding remainders.
pub async fn split_bill(
    pool: &SqlitePool,
    session: &Session,
    config: &Config,
    recipients: &mut RecipientList,
    total: f64,
) -> Result<SplitResult, PayError> {
    let signer = session.signer()?;

    if recipients.is_empty() {
        return Err(PayError::validation("recipients", "add at least one recipient"));
    }
    transfer_service::validate_amount("total", total, config.chain.decimals)?;

    let amount_per_person = recipients.amount_per_person(total);
    // The share is derived, so excess precision is truncated rather than rejected
    let value = parse_units_floor(amount_per_person, config.chain.decimals)
        .map_err(|e| PayError::validation("total", e.to_string()))?;
    if value == 0 {
        return Err(PayError::validation("total", "too small to split between recipients"));
    }

    let count = recipients.len();
    info!(
        "Splitting {} {} among {} recipient(s), {} each",
        total, config.chain.currency_symbol, count, amount_per_person
    );

    let mut records = Vec::with_capacity(count);
    for (i, recipient) in recipients.iter().enumerate() {
        let transfer = TransferRequest::native(recipient.address, value);

        let confirmed = match transfer_service::submit(signer, &transfer).await {
            Ok(confirmed) => confirmed,
            Err(e) if records.is_empty() => return Err(e),
            Err(e) => {
                error!("Bill split stopped at {}/{}: {}", i + 1, count, e);
                return Err(PayError::SplitIncomplete {
                    completed: records.len(),
                    total: count,
                    cause: Box::new(e),
                });
            }
        };

        let mut record = TransactionRecord::new(
            TransactionType::BillSplit,
            confirmed.hash,
            amount_per_person,
            *signer.address(),
            confirmed.timestamp,
        );
        record.recipient = Some(recipient.address);
        record.recipient_name = Some(recipient.name.clone());

        // Funds already moved, so a failed write still reports the partial split
        if let Err(e) = db::ledger::append(pool, &record).await {
            error!("Transfer {} confirmed but not recorded: {}", record.hash, e);
            return Err(PayError::SplitIncomplete {
                completed: records.len() + 1,
                total: count,
                cause: Box::new(PayError::Storage(format!(
                    "transfer {} to {} confirmed but not recorded: {}",
                    record.hash, recipient.name, e
                ))),
            });
        }
        info!("Sent {} to {} ({}/{})", amount_per_person, recipient.name, i + 1, count);
        records.push(record);
    }

    recipients.clear();

    Ok(SplitResult {
        records,
        amount_per_person,
    })
}
