use async_trait::async_trait;

use super::domain::{Account, NewAccount, StoredAccount};
use super::errors::{AccountError, UniqueField};

/// Repository abstraction for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Whether any account already holds `value` in the given unique column.
    async fn is_taken(&self, field: UniqueField, value: &str) -> Result<bool, AccountError>;
    async fn insert(&self, new: NewAccount) -> Result<Account, AccountError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, AccountError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredAccount>, AccountError>;
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    async fn add_reputation_score(&self, id: i32, delta: i32) -> Result<Option<Account>, AccountError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::account::domain::{AdminData, Role, UserData};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccountRepository {
        rows: Mutex<Vec<StoredAccount>>, // ordered by id
    }

    fn column<'a>(a: &'a Account, field: UniqueField) -> Option<&'a str> {
        let p = a.profile();
        match field {
            UniqueField::Username => Some(p.username.as_str()),
            UniqueField::Email => Some(p.email.as_str()),
            UniqueField::Phone => p.phone.as_deref(),
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn is_taken(&self, field: UniqueField, value: &str) -> Result<bool, AccountError> {
            let rows = self.rows.lock().map_err(|e| AccountError::Repository(e.to_string()))?;
            Ok(rows.iter().any(|r| column(&r.account, field) == Some(value)))
        }

        async fn insert(&self, new: NewAccount) -> Result<Account, AccountError> {
            let mut rows = self.rows.lock().map_err(|e| AccountError::Repository(e.to_string()))?;
            for field in [UniqueField::Username, UniqueField::Email, UniqueField::Phone] {
                let value = match field {
                    UniqueField::Username => Some(new.username.as_str()),
                    UniqueField::Email => Some(new.email.as_str()),
                    UniqueField::Phone => new.phone.as_deref(),
                };
                if value.is_some() && rows.iter().any(|r| column(&r.account, field) == value) {
                    return Err(AccountError::Duplicate(field));
                }
            }
            let id = rows.last().map(|r| r.account.id() + 1).unwrap_or(1);
            let profile = UserData {
                id,
                username: new.username,
                display_name: new.display_name,
                phone: new.phone,
                email: new.email,
                reputation_score: 0,
                created_at: chrono::Utc::now().into(),
            };
            let account = match new.role {
                Role::User => Account::Regular(profile),
                Role::Admin => Account::Admin(AdminData { profile }),
            };
            rows.push(StoredAccount { account: account.clone(), password_hash: new.password_hash });
            Ok(account)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Account>, AccountError> {
            let rows = self.rows.lock().map_err(|e| AccountError::Repository(e.to_string()))?;
            Ok(rows.iter().find(|r| r.account.id() == id).map(|r| r.account.clone()))
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<StoredAccount>, AccountError> {
            let rows = self.rows.lock().map_err(|e| AccountError::Repository(e.to_string()))?;
            Ok(rows.iter().find(|r| r.account.profile().username == username).cloned())
        }

        async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
            let rows = self.rows.lock().map_err(|e| AccountError::Repository(e.to_string()))?;
            Ok(rows.iter().map(|r| r.account.clone()).collect())
        }

        async fn add_reputation_score(&self, id: i32, delta: i32) -> Result<Option<Account>, AccountError> {
            let mut rows = self.rows.lock().map_err(|e| AccountError::Repository(e.to_string()))?;
            let Some(row) = rows.iter_mut().find(|r| r.account.id() == id) else { return Ok(None) };
            let profile = match &mut row.account {
                Account::Regular(u) => u,
                Account::Admin(a) => &mut a.profile,
            };
            profile.reputation_score = profile.reputation_score.saturating_add(delta);
            Ok(Some(row.account.clone()))
        }
    }
}
