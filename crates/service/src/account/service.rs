use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use configs::BootstrapAdmin;

use super::domain::{Account, NewAccount, Role, SignUpInput};
use super::errors::{AccountError, UniqueField};
use super::repository::AccountRepository;

/// Account business service independent of web framework
pub struct UserService<R: AccountRepository> {
    repo: Arc<R>,
}

fn required(value: &str, field: &'static str) -> Result<String, AccountError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AccountError::MissingField(field));
    }
    Ok(v.to_string())
}

pub(crate) fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AccountError::HashError(e.to_string()))?
        .to_string())
}

impl<R: AccountRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register a user or admin with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::account::{UserService, SignUpInput, repository::mock::MockAccountRepository};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MockAccountRepository::default()));
    /// let input = SignUpInput {
    ///     username: "alice".into(), password: "s3cret".into(), display_name: "Alice".into(),
    ///     phone: None, email: "alice@example.com".into(), is_admin: false,
    /// };
    /// let account = tokio_test::block_on(svc.sign_up(input)).unwrap();
    /// assert_eq!(account.profile().username, "alice");
    /// assert!(!account.is_admin());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username, is_admin = input.is_admin))]
    pub async fn sign_up(&self, input: SignUpInput) -> Result<Account, AccountError> {
        let username = required(&input.username, "username")?;
        if input.password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }
        let display_name = required(&input.display_name, "display_name")?;
        let email = required(&input.email, "email")?;
        let phone = input.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()).map(str::to_string);
        models::user::validate_profile(&username, &display_name, &email, phone.as_deref())?;

        let mut checks = vec![(UniqueField::Username, username.as_str()), (UniqueField::Email, email.as_str())];
        if let Some(p) = phone.as_deref() {
            checks.push((UniqueField::Phone, p));
        }
        for (field, value) in checks {
            if self.repo.is_taken(field, value).await? {
                debug!(%field, "sign_up_duplicate");
                return Err(AccountError::Duplicate(field));
            }
        }

        let role = if input.is_admin { Role::Admin } else { Role::User };
        let account = self
            .repo
            .insert(NewAccount { role, username, password_hash: hash_password(&input.password)?, display_name, phone, email })
            .await?;
        info!(event = "user_registered", user_id = account.id(), role = %role, "account created");
        Ok(account)
    }

    /// Authenticate by exact username; `None` on any mismatch.
    ///
    /// # Examples
    /// ```
    /// use service::account::{UserService, SignUpInput, repository::mock::MockAccountRepository};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MockAccountRepository::default()));
    /// let _ = tokio_test::block_on(svc.sign_up(SignUpInput {
    ///     username: "bob".into(), password: "pw".into(), display_name: "Bob".into(),
    ///     phone: None, email: "bob@example.com".into(), is_admin: true,
    /// }));
    /// let ok = tokio_test::block_on(svc.login("bob", "pw")).unwrap();
    /// assert!(ok.map(|a| a.is_admin()).unwrap_or(false));
    /// assert!(tokio_test::block_on(svc.login("bob", "PW")).unwrap().is_none());
    /// ```
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<Account>, AccountError> {
        let Some(stored) = self.repo.find_by_username(username).await? else {
            debug!("login_unknown_user");
            return Ok(None);
        };
        let parsed = PasswordHash::new(&stored.password_hash).map_err(|e| AccountError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(password.as_bytes(), &parsed).is_err() {
            warn!(user_id = stored.account.id(), "login_password_mismatch");
            return Ok(None);
        }
        info!(event = "user_logged_in", user_id = stored.account.id());
        Ok(Some(stored.account))
    }

    pub async fn fetch_user_by_id(&self, id: i32) -> Result<Option<Account>, AccountError> {
        self.repo.find_by_id(id).await
    }

    /// All accounts, ordered by id.
    pub async fn fetch_all_users(&self) -> Result<Vec<Account>, AccountError> {
        self.repo.list_all().await
    }

    /// Whether the configured bootstrap username belongs to an admin account.
    pub async fn is_default_admin_exists(&self, admin: &BootstrapAdmin) -> Result<bool, AccountError> {
        let found = self.repo.find_by_username(&admin.username).await?;
        Ok(found.map(|s| s.account.is_admin()).unwrap_or(false))
    }

    /// Seed the bootstrap administrator when no account holds its username.
    /// Returns whether a row was created.
    #[instrument(skip(self, admin), fields(username = %admin.username))]
    pub async fn ensure_default_admin(&self, admin: &BootstrapAdmin) -> Result<bool, AccountError> {
        if self.repo.find_by_username(&admin.username).await?.is_some() {
            debug!("bootstrap_admin_present");
            return Ok(false);
        }
        self.sign_up(SignUpInput {
            username: admin.username.clone(),
            password: admin.password.clone(),
            display_name: admin.display_name.clone(),
            phone: None,
            email: admin.email.clone(),
            is_admin: true,
        })
        .await?;
        info!(event = "bootstrap_admin_created", username = %admin.username);
        Ok(true)
    }

    #[instrument(skip(self))]
    pub async fn add_reputation_score(&self, id: i32, delta: i32) -> Result<Option<Account>, AccountError> {
        self.repo.add_reputation_score(id, delta).await
    }
}
