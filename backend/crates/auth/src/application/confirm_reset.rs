//! Confirm Password Reset Use Case
//!
//! Validates the submitted code, replaces the password, and burns the
//! code. Every identity-related failure collapses into the same
//! `InvalidToken` error; a weak replacement password is the one
//! failure reported distinctly, since the caller has already proven
//! possession of the code by the time it matters, and validation runs
//! on both paths anyway.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use platform::rate_limit::{RateLimitConfig, RateLimitStore};

use crate::application::config::AuthConfig;
use crate::application::reset_code::ResetCodeService;
use crate::domain::repository::{AccountRepository, ResetMarkRepository};
use crate::domain::value_object::{AccountPassword, Email, RawPassword};
use crate::error::{AuthError, AuthResult};

/// Confirm reset use case
pub struct ConfirmResetUseCase<R, M, L> {
    accounts: Arc<R>,
    codes: ResetCodeService<M>,
    limiter: Arc<L>,
    config: Arc<AuthConfig>,
}

impl<R, M, L> ConfirmResetUseCase<R, M, L>
where
    R: AccountRepository,
    M: ResetMarkRepository,
    L: RateLimitStore,
{
    pub fn new(
        accounts: Arc<R>,
        codes: ResetCodeService<M>,
        limiter: Arc<L>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            accounts,
            codes,
            limiter,
            config,
        }
    }

    /// Execute a reset confirmation for a client partition
    pub async fn execute(
        &self,
        email_raw: &str,
        code: &str,
        new_password: String,
        partition_key: &str,
    ) -> AuthResult<()> {
        let admitted = self
            .limiter
            .check_and_increment(partition_key, &self.config.rate_limit)
            .await
            .map_err(|e| AuthError::Internal(format!("Rate limit check failed: {}", e)))?;
        if !admitted.allowed {
            return Err(AuthError::RateLimited);
        }

        // Password policy first: a user with a valid code should not
        // burn it learning their new password is too weak.
        let raw_password = RawPassword::new(new_password)
            .map_err(|e| AuthError::WeakPassword(e.message().to_string()))?;

        let now_secs = now_secs();

        let account = match Email::new(email_raw) {
            Ok(email) => self.accounts.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            // Spend comparable work before answering for an unknown
            // email; the reply is the same InvalidToken either way.
            self.codes.decoy_verify(code, now_secs).await?;
            return Err(AuthError::InvalidToken);
        };

        let window = self
            .codes
            .verify_at(&account.account_id, code, now_secs)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Replace before marking consumed: a crash between the two
        // leaves a usable code and a new password, never a burned code
        // with the old password still in place.
        self.accounts
            .replace_password(&account.account_id, &password_hash)
            .await?;
        self.codes.consume(&account.account_id, window).await?;

        tracing::info!(account_id = %account.account_id, "Password reset completed");

        Ok(())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
