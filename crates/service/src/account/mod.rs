//! Account module: three-layer architecture (domain, repository, service).
//!
//! Regular users and admins live in one `users` table; this module exposes
//! them as the [`domain::Account`] enum and owns registration and login.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{Account, AdminData, Identity, Role, SignUpInput, UserData};
pub use errors::{AccountError, UniqueField};
pub use service::UserService;
