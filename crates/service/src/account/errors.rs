use std::fmt;

use thiserror::Error;

/// Columns with a unique key on `users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
    Phone,
}

impl UniqueField {
    pub fn column(&self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
            UniqueField::Phone => "phone",
        }
    }

    /// Recover the offending column from a driver's unique-violation message,
    /// e.g. `UNIQUE constraint failed: users.email` or `users_email_key`.
    pub fn from_violation(msg: &str) -> Option<Self> {
        [UniqueField::Username, UniqueField::Email, UniqueField::Phone]
            .into_iter()
            .find(|f| msg.contains(f.column()))
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.column()) }
}

/// Business errors for account workflows
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} is already taken")]
    Duplicate(UniqueField),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AccountError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AccountError::MissingField(_) => 1001,
            AccountError::Duplicate(_) => 1002,
            AccountError::Invalid(_) => 1003,
            AccountError::HashError(_) => 1101,
            AccountError::Repository(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for AccountError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Validation(msg) => AccountError::Invalid(msg),
            ModelError::UniqueViolation(msg) => match UniqueField::from_violation(&msg) {
                Some(field) => AccountError::Duplicate(field),
                None => AccountError::Repository(msg),
            },
            ModelError::Db(msg) => AccountError::Repository(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn unique_violation_names_the_column() {
        let sqlite = ModelError::UniqueViolation("UNIQUE constraint failed: users.email".into());
        assert!(matches!(AccountError::from(sqlite), AccountError::Duplicate(UniqueField::Email)));

        let pg = ModelError::UniqueViolation("duplicate key value violates unique constraint \"users_phone_key\"".into());
        assert!(matches!(AccountError::from(pg), AccountError::Duplicate(UniqueField::Phone)));

        let other = ModelError::UniqueViolation("something else".into());
        assert_eq!(AccountError::from(other).code(), 1200);
    }
}
