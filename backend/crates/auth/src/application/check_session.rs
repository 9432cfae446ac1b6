//! Check Session Use Case
//!
//! Resolves a session token to a live account. A valid signature over
//! a deleted account is still an invalid session.

use std::sync::Arc;

use crate::application::session_token::SessionIssuer;
use crate::domain::entity::account::Account;
use crate::domain::entity::session::SessionClaims;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<R> {
    accounts: Arc<R>,
    sessions: SessionIssuer,
}

impl<R: AccountRepository> CheckSessionUseCase<R> {
    pub fn new(accounts: Arc<R>, sessions: SessionIssuer) -> Self {
        Self { accounts, sessions }
    }

    /// Validate a token and load its account
    pub async fn execute(&self, token: &str) -> AuthResult<(Account, SessionClaims)> {
        let claims = self.sessions.validate(token)?;

        let account = self
            .accounts
            .find_by_id(&claims.account_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        Ok((account, claims))
    }
}
