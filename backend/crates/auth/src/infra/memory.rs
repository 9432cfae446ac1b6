//! In-Memory Repository Implementation
//!
//! HashMap-backed account store implementing the same traits as the
//! PostgreSQL repository. Used by the test suite and usable for
//! single-process demo setups.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, ResetMarkRepository};
use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, email::Email,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    by_email: HashMap<String, Uuid>,
    reset_marks: HashMap<Uuid, u64>,
}

/// In-memory account repository
#[derive(Clone, Default)]
pub struct MemoryAccountRepository {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> AuthError {
        AuthError::Internal("Account store lock poisoned".to_string())
    }
}

impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;

        if inner.by_email.contains_key(account.email.as_str()) {
            return Err(AuthError::DuplicateEmail);
        }

        let id = *account.account_id.as_uuid();
        inner.by_email.insert(account.email.as_str().to_string(), id);
        inner.accounts.insert(id, account.clone());

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner.accounts.get(account_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        let id = inner.by_email.get(email.as_str());
        Ok(id.and_then(|id| inner.accounts.get(id)).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner.by_email.contains_key(email.as_str()))
    }

    async fn replace_password(
        &self,
        account_id: &AccountId,
        password_hash: &AccountPassword,
    ) -> AuthResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;

        if let Some(account) = inner.accounts.get_mut(account_id.as_uuid()) {
            account.replace_password(password_hash.clone());
        }

        Ok(())
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;

        if let Some(stored) = inner.accounts.get_mut(account.account_id.as_uuid()) {
            *stored = account.clone();
        }

        Ok(())
    }
}

impl ResetMarkRepository for MemoryAccountRepository {
    async fn mark_consumed(&self, account_id: &AccountId, window: u64) -> AuthResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;

        let mark = inner.reset_marks.entry(*account_id.as_uuid()).or_insert(0);
        *mark = (*mark).max(window);

        Ok(())
    }

    async fn last_consumed_window(&self, account_id: &AccountId) -> AuthResult<Option<u64>> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner.reset_marks.get(account_id.as_uuid()).copied())
    }
}
