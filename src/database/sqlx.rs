use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use super::registry::RegistryError;

pub(crate) const CREATE_LCVS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS lcvs (
        id INTEGER PRIMARY KEY,
        capacity REAL NOT NULL
    )
    "#;

/// Open the vehicle registry database, creating the file and schema if missing.
pub async fn db_connection(database_url: &str) -> Result<SqlitePool, RegistryError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Every connection to an in-memory database sees its own empty database.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    info!("Connected to SQLite database at {database_url}");

    sqlx::query(CREATE_LCVS_TABLE).execute(&pool).await?;

    Ok(pool)
}
