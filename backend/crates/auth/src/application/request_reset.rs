//! Request Password Reset Use Case
//!
//! The response is the same whether or not the email belongs to an
//! account: 200, generic message, nothing else. Anything that could
//! distinguish the two paths (validation errors, delivery failures)
//! is logged and swallowed. Only the rate limit is allowed to surface.

use std::sync::Arc;

use platform::rate_limit::{RateLimitConfig, RateLimitStore};

use crate::application::reset_code::ResetCodeService;
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AccountRepository, ResetMarkRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Request reset use case
pub struct RequestResetUseCase<R, M, N, L> {
    accounts: Arc<R>,
    codes: ResetCodeService<M>,
    notifier: Arc<N>,
    limiter: Arc<L>,
    rate_limit: RateLimitConfig,
}

impl<R, M, N, L> RequestResetUseCase<R, M, N, L>
where
    R: AccountRepository,
    M: ResetMarkRepository,
    N: Notifier,
    L: RateLimitStore,
{
    pub fn new(
        accounts: Arc<R>,
        codes: ResetCodeService<M>,
        notifier: Arc<N>,
        limiter: Arc<L>,
        rate_limit: RateLimitConfig,
    ) -> Self {
        Self {
            accounts,
            codes,
            notifier,
            limiter,
            rate_limit,
        }
    }

    /// Execute a reset request for a client partition
    ///
    /// `partition_key` identifies the requesting client for rate
    /// limiting (normally its IP address).
    pub async fn execute(&self, email_raw: &str, partition_key: &str) -> AuthResult<()> {
        let admitted = self
            .limiter
            .check_and_increment(partition_key, &self.rate_limit)
            .await
            .map_err(|e| AuthError::Internal(format!("Rate limit check failed: {}", e)))?;
        if !admitted.allowed {
            return Err(AuthError::RateLimited);
        }

        // From here on every outcome is the same generic success.
        let email = match Email::new(email_raw) {
            Ok(email) => email,
            Err(_) => {
                tracing::debug!("Reset requested for malformed email");
                return Ok(());
            }
        };

        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                tracing::debug!("Reset requested for unknown email");
                return Ok(());
            }
        };

        let issued = self.codes.issue(&account.account_id)?;

        let subject = "Your password reset code";
        let body = format!(
            "Your password reset code is {}. It expires in 15 minutes. \
             If you did not request this, you can ignore this message.",
            issued.code
        );

        // Delivery failure must not change the response.
        if let Err(e) = self.notifier.send(&account.email, subject, &body).await {
            tracing::warn!(
                account_id = %account.account_id,
                error = %e,
                "Failed to deliver reset code"
            );
        } else {
            tracing::info!(account_id = %account.account_id, "Reset code issued");
        }

        Ok(())
    }
}
