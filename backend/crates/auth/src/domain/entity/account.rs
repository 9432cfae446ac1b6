//! Account Entity
//!
//! A registered user: identity, credential hash, and profile claims.
//! Accounts are created by registration and never physically deleted
//! by this core; the password hash changes only through the reset flow.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, display_name::DisplayName,
    email::Email, phone::Phone,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Unique lookup key (lowercased)
    pub email: Email,
    /// Argon2id PHC hash
    pub password_hash: AccountPassword,
    /// Display name profile claim
    pub display_name: DisplayName,
    /// Optional phone profile claim
    pub phone: Option<Phone>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    pub fn new(
        email: Email,
        password_hash: AccountPassword,
        display_name: DisplayName,
        phone: Option<Phone>,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            password_hash,
            display_name,
            phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the password hash (reset flow)
    pub fn replace_password(&mut self, password_hash: AccountPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Update the display name claim
    pub fn set_display_name(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::RawPassword;

    fn test_account() -> Account {
        let raw = RawPassword::new("S3cure!".to_string()).unwrap();
        Account::new(
            Email::new("alice@example.com").unwrap(),
            AccountPassword::from_raw(&raw, None).unwrap(),
            DisplayName::new("Alice").unwrap(),
            None,
        )
    }

    #[test]
    fn test_new_account_has_fresh_id() {
        let a = test_account();
        let b = test_account();
        assert_ne!(a.account_id, b.account_id);
    }

    #[test]
    fn test_replace_password_bumps_updated_at() {
        let mut account = test_account();
        let before = account.updated_at;

        let raw = RawPassword::new("N3wPass!".to_string()).unwrap();
        let new_hash = AccountPassword::from_raw(&raw, None).unwrap();
        account.replace_password(new_hash);

        assert!(account.updated_at >= before);
        assert!(account.password_hash.verify(&raw, None));
    }
}
