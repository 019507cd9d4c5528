#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, migrate};

/// A fresh in-memory SQLite database with the schema applied.
///
/// Each call gets its own database, so tests never share rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
