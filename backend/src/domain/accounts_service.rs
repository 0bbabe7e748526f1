//! Account service: registration, login, token checks, and user listings.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountService, PasswordHasher, PasswordHasherError, TokenIssuer, TokenIssuerError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    AuthSession, EmailAddress, Error, Identity, LoginCredentials, PasswordHash, Registration,
    User, UserAccount, UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict("User already exists"),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_join_error(error: tokio::task::JoinError) -> Error {
    Error::internal(format!("password task failed: {error}"))
}

fn map_token_error(error: TokenIssuerError) -> Error {
    match error {
        TokenIssuerError::Invalid | TokenIssuerError::Expired => {
            Error::unauthorized("Not authorized to access this route")
        }
        TokenIssuerError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
    }
}

/// Account service implementing the [`AccountService`] driving port.
#[derive(Clone)]
pub struct AccountsService<U> {
    user_repo: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountsService<U> {
    /// Create the service from its collaborators.
    pub fn new(
        user_repo: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
            clock,
        }
    }

    /// Argon2 work runs on the blocking pool so async workers keep serving.
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(map_join_error)?
            .map_err(map_hasher_error)
    }

    async fn password_matches(&self, password: &str, hash: &PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(map_join_error)?
            .map_err(map_hasher_error)
    }

    fn session_for(&self, user: User) -> Result<AuthSession, Error> {
        let token = self
            .tokens
            .issue(&Identity {
                user_id: user.id,
                role: user.role,
            })
            .map_err(map_token_error)?;
        Ok(AuthSession { token, user })
    }
}

#[async_trait]
impl<U> AccountService for AccountsService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        let password_hash = self.hash_password(registration.password()).await?;
        let user = User {
            id: UserId::random(),
            name: registration.name,
            email: registration.email,
            role: registration.role,
            blood_type: registration.blood_type,
            created_at: self.clock.utc(),
        };

        self.user_repo
            .insert(&UserAccount {
                user: user.clone(),
                password_hash,
            })
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id, role = %user.role, "account registered");
        self.session_for(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        // Malformed addresses cannot belong to an account.
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let account = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .password_matches(credentials.password(), &account.password_hash)
            .await?;
        if !matches {
            warn!(user_id = %account.user.id, "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.session_for(account.user)
    }

    fn authenticate(&self, token: &str) -> Result<Identity, Error> {
        self.tokens.verify(token).map_err(map_token_error)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let mut users = self.user_repo.list_all().await.map_err(map_user_error)?;
        users.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));
        Ok(users)
    }
}

#[cfg(test)]
#[path = "accounts_service_tests.rs"]
mod tests;
