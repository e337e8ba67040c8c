use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub mod ledger;
pub mod store;
pub mod subscription;

const CREATE_TABLES_SQL: &str = include_str!("../../migrations/create_tables.sql");

/// Open the SQLite database at `database_url` and create tables.
///
/// A single connection is kept open for the process lifetime, which also keeps
/// `sqlite::memory:` databases alive between calls.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_tables(&pool).await?;

    Ok(pool)
}

/// Create all database tables
async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(CREATE_TABLES_SQL).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    init_db("sqlite::memory:").await.expect("in-memory database")
}
