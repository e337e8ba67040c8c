use sqlx::sqlite::SqlitePool;

use crate::db::store;
use crate::models::Subscription;
use crate::utils::errors::PayError;

pub const SUBSCRIPTIONS_KEY: &str = "subscriptions";

/// Append a schedule to the stored list
pub async fn append(pool: &SqlitePool, subscription: &Subscription) -> Result<(), PayError> {
    let mut tx = pool.begin().await?;

    let raw = store::get_value(&mut *tx, SUBSCRIPTIONS_KEY).await?;
    let mut subscriptions: Vec<Subscription> = store::parse_list(SUBSCRIPTIONS_KEY, raw);
    subscriptions.push(subscription.clone());

    let encoded = serde_json::to_string(&subscriptions)
        .map_err(|e| PayError::Storage(format!("Failed to encode subscriptions: {}", e)))?;
    store::put_value(&mut *tx, SUBSCRIPTIONS_KEY, &encoded).await?;

    tx.commit().await?;
    Ok(())
}

/// All stored schedules in creation order. Read failures yield an empty list.
pub async fn load_all(pool: &SqlitePool) -> Vec<Subscription> {
    match store::get_value(pool, SUBSCRIPTIONS_KEY).await {
        Ok(raw) => store::parse_list(SUBSCRIPTIONS_KEY, raw),
        Err(e) => {
            tracing::warn!("Failed to read subscriptions, treating as empty: {}", e);
            Vec::new()
        }
    }
}
