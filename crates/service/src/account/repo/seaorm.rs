use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::account::domain::{Account, AdminData, NewAccount, Role, StoredAccount, UserData};
use crate::account::errors::{AccountError, UniqueField};
use crate::account::repository::AccountRepository;
use models::user::{self, AccountKind};

pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn repo_err(e: sea_orm::DbErr) -> AccountError { AccountError::Repository(e.to_string()) }

/// Map a `users` row onto the account enum via its `type` discriminator.
pub(crate) fn stored_from_model(m: user::Model) -> StoredAccount {
    let profile = UserData {
        id: m.id,
        username: m.username,
        display_name: m.display_name,
        phone: m.phone,
        email: m.email,
        reputation_score: m.reputation_score,
        created_at: m.created_at,
    };
    let account = match m.kind {
        AccountKind::User => Account::Regular(profile),
        AccountKind::Admin => Account::Admin(AdminData { profile }),
    };
    StoredAccount { account, password_hash: m.password_hash }
}

pub(crate) fn account_from_model(m: user::Model) -> Account { stored_from_model(m).account }

#[async_trait::async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn is_taken(&self, field: UniqueField, value: &str) -> Result<bool, AccountError> {
        let column = match field {
            UniqueField::Username => user::Column::Username,
            UniqueField::Email => user::Column::Email,
            UniqueField::Phone => user::Column::Phone,
        };
        let n = user::Entity::find()
            .filter(column.eq(value.to_string()))
            .count(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(n > 0)
    }

    async fn insert(&self, new: NewAccount) -> Result<Account, AccountError> {
        let kind = match new.role {
            Role::User => AccountKind::User,
            Role::Admin => AccountKind::Admin,
        };
        let created = user::create(
            &self.db,
            user::NewUser {
                kind,
                username: new.username,
                password_hash: new.password_hash,
                display_name: new.display_name,
                phone: new.phone,
                email: new.email,
            },
        )
        .await?;
        Ok(account_from_model(created))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, AccountError> {
        let res = user::Entity::find_by_id(id).one(&self.db).await.map_err(repo_err)?;
        Ok(res.map(account_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<StoredAccount>, AccountError> {
        let res = user::Entity::find()
            .filter(user::Column::Username.eq(username.to_string()))
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(res.map(stored_from_model))
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(rows.into_iter().map(account_from_model).collect())
    }

    async fn add_reputation_score(&self, id: i32, delta: i32) -> Result<Option<Account>, AccountError> {
        let updated = user::add_reputation_score(&self.db, id, delta).await?;
        Ok(updated.map(account_from_model))
    }
}
