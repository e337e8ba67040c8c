use sqlx::sqlite::SqlitePool;

use crate::db::store;
use crate::models::TransactionRecord;
use crate::utils::errors::PayError;

pub const LEDGER_KEY: &str = "transactions";

/// Maximum number of records kept, newest first
pub const LEDGER_CAPACITY: usize = 50;

/// Validate and prepend a record, keeping the 50 most recent.
///
/// The read-modify-write of the stored array runs in one transaction.
pub async fn append(pool: &SqlitePool, record: &TransactionRecord) -> Result<(), PayError> {
    if record.hash.trim().is_empty() {
        return Err(PayError::InvalidRecord("hash is empty".to_string()));
    }
    if !record.amount.is_finite() || record.amount < 0.0 {
        return Err(PayError::InvalidRecord(format!("amount {} is negative or not a number", record.amount)));
    }

    let mut tx = pool.begin().await?;

    let raw = store::get_value(&mut *tx, LEDGER_KEY).await?;
    let mut records: Vec<TransactionRecord> = store::parse_list(LEDGER_KEY, raw);

    if records.iter().any(|existing| existing.hash == record.hash) {
        return Err(PayError::InvalidRecord(format!("duplicate hash {}", record.hash)));
    }

    records.insert(0, record.clone());
    records.truncate(LEDGER_CAPACITY);

    let encoded = serde_json::to_string(&records)
        .map_err(|e| PayError::Storage(format!("Failed to encode ledger: {}", e)))?;
    store::put_value(&mut *tx, LEDGER_KEY, &encoded).await?;

    tx.commit().await?;

    tracing::debug!("Ledger now holds {} record(s)", records.len());
    Ok(())
}

/// All stored records, newest first. Read failures yield an empty ledger.
pub async fn load_all(pool: &SqlitePool) -> Vec<TransactionRecord> {
    match store::get_value(pool, LEDGER_KEY).await {
        Ok(raw) => store::parse_list(LEDGER_KEY, raw),
        Err(e) => {
            tracing::warn!("Failed to read ledger, treating as empty: {}", e);
            Vec::new()
        }
    }
}
