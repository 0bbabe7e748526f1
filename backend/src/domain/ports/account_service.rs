//! Driving port for registration, login, and account listings.
//!
//! Inbound adapters call this port to authenticate callers without knowing
//! how passwords are hashed or tokens are signed.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, Identity, LoginCredentials, Registration, User};

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and sign a token for it.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Check credentials and sign a token for the matching account.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;

    /// Resolve a presented bearer token to the identity it carries.
    fn authenticate(&self, token: &str) -> Result<Identity, Error>;

    /// Every user, without password hashes.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
