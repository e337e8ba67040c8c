//! Key/value rows holding JSON arrays

use serde::de::DeserializeOwned;
use sqlx::{Executor, Sqlite};

/// Raw JSON stored under `key`
pub async fn get_value<'e, E>(executor: E, key: &str) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
        .bind(key.to_string())
        .fetch_optional(executor)
        .await
}

/// Insert or replace the JSON stored under `key`
pub async fn put_value<'e, E>(executor: E, key: &str, value: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key.to_string())
    .bind(value.to_string())
    .bind(chrono::Utc::now().timestamp_millis())
    .execute(executor)
    .await?;

    Ok(())
}

/// Decode a stored JSON array. Missing or malformed data reads as empty.
pub fn parse_list<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Ignoring malformed '{}' data: {}", key, e);
            Vec::new()
        }
    }
}
