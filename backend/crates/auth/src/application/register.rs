//! Registration Use Case
//!
//! Creates an account and signs the user in immediately: one round
//! trip from registration form to authenticated session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionIssuer;
use crate::domain::entity::account::Account;
use crate::domain::entity::session::SessionClaims;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    AccountId, AccountPassword, DisplayName, Email, Phone, RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Registration input
#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub phone: Option<String>,
}

/// Registration output
pub struct RegisterOutput {
    pub account_id: AccountId,
    pub session_token: String,
    pub session: SessionClaims,
}

/// Register use case
pub struct RegisterUseCase<R> {
    accounts: Arc<R>,
    sessions: SessionIssuer,
    config: Arc<AuthConfig>,
}

impl<R: AccountRepository> RegisterUseCase<R> {
    pub fn new(accounts: Arc<R>, sessions: SessionIssuer, config: Arc<AuthConfig>) -> Self {
        Self {
            accounts,
            sessions,
            config,
        }
    }

    /// Execute registration
    ///
    /// ## Flow
    /// 1. Validate email, display name, phone, and password policy
    /// 2. Reject duplicate email
    /// 3. Hash the password (Argon2id)
    /// 4. Persist the account
    /// 5. Issue a session token
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email =
            Email::new(&input.email).map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let display_name = DisplayName::new(&input.display_name)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let phone = match input.phone {
            Some(raw) if !raw.trim().is_empty() => Some(
                Phone::new(&raw).map_err(|e| AuthError::Validation(e.message().to_string()))?,
            ),
            _ => None,
        };

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::WeakPassword(e.message().to_string()))?;

        // Cheap pre-check; the unique index is the real guarantee and
        // create() maps its violation to the same error.
        if self.accounts.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let account = Account::new(email, password_hash, display_name, phone);
        self.accounts.create(&account).await?;

        let (session_token, session) = self.sessions.issue(&account.account_id);

        tracing::info!(account_id = %account.account_id, "Account registered");

        Ok(RegisterOutput {
            account_id: account.account_id,
            session_token,
            session,
        })
    }
}
