//! Accounts held in process memory.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User, UserAccount, UserId};

/// [`UserRepository`] keeping accounts in a lock-guarded map.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut accounts = self.accounts.write();
        if accounts
            .values()
            .any(|existing| existing.user.email == account.user.email)
        {
            return Err(UserRepositoryError::duplicate_email(
                account.user.email.as_ref(),
            ));
        }
        accounts.insert(account.user.id, account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        Ok(self
            .accounts
            .read()
            .values()
            .find(|account| &account.user.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        let accounts = self.accounts.read();
        Ok(ids
            .iter()
            .filter_map(|id| accounts.get(id))
            .map(|account| account.user.clone())
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut users: Vec<User> = self
            .accounts
            .read()
            .values()
            .map(|account| account.user.clone())
            .collect();
        users.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));
        Ok(users)
    }
}
