//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer; the flows never see a concrete store.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, email::Email,
};
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account
    ///
    /// Fails with `AuthError::DuplicateEmail` if the email is taken.
    async fn create(&self, account: &Account) -> AuthResult<()>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    /// Find account by email (case-insensitive by construction)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Replace the stored password hash for an account
    async fn replace_password(
        &self,
        account_id: &AccountId,
        password_hash: &AccountPassword,
    ) -> AuthResult<()>;

    /// Update account profile claims
    async fn update(&self, account: &Account) -> AuthResult<()>;
}

/// Reset-mark repository trait
///
/// Reset codes are derived, not stored; the only persisted state is a
/// high-water mark of the newest consumed derivation window per
/// account. A code whose window is at or below the mark is spent.
#[trait_variant::make(ResetMarkRepository: Send)]
pub trait LocalResetMarkRepository {
    /// Record that the code for `window` has been consumed
    ///
    /// The mark only ever moves forward; a smaller window never
    /// overwrites a larger one.
    async fn mark_consumed(&self, account_id: &AccountId, window: u64) -> AuthResult<()>;

    /// The newest consumed window for an account, if any
    async fn last_consumed_window(&self, account_id: &AccountId) -> AuthResult<Option<u64>>;
}
