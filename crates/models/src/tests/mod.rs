use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, migrate};
use crate::user::{self, AccountKind, NewUser};

/// CRUD operations tests for the entities
pub mod crud_tests;


/// Fresh in-memory database with the full schema applied.
async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}

fn new_user(kind: AccountKind, username: &str) -> NewUser {
    NewUser {
        kind,
        username: username.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        display_name: format!("{username} display"),
        phone: None,
        email: format!("{username}@example.com"),
    }
}

async fn create_admin(db: &DatabaseConnection, username: &str) -> anyhow::Result<user::Model> {
    Ok(user::create(db, new_user(AccountKind::Admin, username)).await?)
}
