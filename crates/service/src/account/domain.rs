use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Registration input, straight from the sign-up form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpInput {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Profile columns shared by every account kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub reputation_score: i32,
    pub created_at: DateTime<FixedOffset>,
}

/// An account allowed to author posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminData {
    pub profile: UserData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Account {
    Regular(UserData),
    Admin(AdminData),
}

impl Account {
    pub fn profile(&self) -> &UserData {
        match self {
            Account::Regular(u) => u,
            Account::Admin(a) => &a.profile,
        }
    }

    pub fn id(&self) -> i32 { self.profile().id }

    pub fn display_name(&self) -> &str { &self.profile().display_name }

    pub fn role(&self) -> Role {
        match self {
            Account::Regular(_) => Role::User,
            Account::Admin(_) => Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool { matches!(self, Account::Admin(_)) }

    pub fn as_admin(&self) -> Option<&AdminData> {
        match self {
            Account::Admin(a) => Some(a),
            Account::Regular(_) => None,
        }
    }

    /// The subset of the account that travels inside a session.
    pub fn identity(&self) -> Identity {
        Identity { id: self.id(), display_name: self.display_name().to_string(), role: self.role() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Who is logged in, as recorded in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i32,
    pub display_name: String,
    pub role: Role,
}

/// Row values for a new account; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub role: Role,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub email: String,
}

/// An account together with its stored password hash, used only by login.
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub account: Account,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::User.to_string(), "user");
        assert!("root".parse::<Role>().is_err());
    }
}
