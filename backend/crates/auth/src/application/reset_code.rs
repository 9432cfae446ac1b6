//! Reset Code Derivation and Verification
//!
//! Password reset codes are never stored. Each code is a 6-digit TOTP
//! over a per-account key derived as HMAC-SHA256(reset secret, account
//! UUID), with a 15-minute step. The code for one account verifies for
//! no other account, and an old code dies with its window.
//!
//! Single-use is enforced through the reset-mark repository: consuming
//! a code records its derivation window, and verification refuses any
//! window at or below the recorded mark. Requesting a new code inside
//! the same window re-derives the same digits, so a consumed mark
//! holds until the window advances.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use totp_rs::{Algorithm, TOTP};
use uuid::Uuid;

use platform::crypto::{constant_time_eq, hmac_sha256};

use crate::domain::repository::ResetMarkRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AuthError, AuthResult};

/// A freshly derived reset code
#[derive(Debug, Clone)]
pub struct IssuedResetCode {
    /// The digits to deliver to the user
    pub code: String,
    /// Derivation window the code belongs to
    pub window: u64,
    /// Unix ms after which the code is certainly dead
    pub expires_at_ms: i64,
}

/// Derives, verifies, and consumes per-account reset codes
pub struct ResetCodeService<M> {
    marks: Arc<M>,
    secret: Vec<u8>,
    step_secs: u64,
    digits: usize,
}

impl<M> Clone for ResetCodeService<M> {
    fn clone(&self) -> Self {
        Self {
            marks: Arc::clone(&self.marks),
            secret: self.secret.clone(),
            step_secs: self.step_secs,
            digits: self.digits,
        }
    }
}

impl<M: ResetMarkRepository> ResetCodeService<M> {
    pub fn new(marks: Arc<M>, secret: Vec<u8>, step_secs: u64, digits: usize) -> Self {
        Self {
            marks,
            secret,
            step_secs: step_secs.max(1),
            digits,
        }
    }

    /// Derive the code for an account at the current time
    pub fn issue(&self, account_id: &AccountId) -> AuthResult<IssuedResetCode> {
        self.issue_at(account_id, now_secs())
    }

    /// Derive the code for an account at an explicit time
    pub fn issue_at(&self, account_id: &AccountId, now_secs: u64) -> AuthResult<IssuedResetCode> {
        let totp = self.account_totp(account_id)?;
        let window = now_secs / self.step_secs;

        Ok(IssuedResetCode {
            code: totp.generate(now_secs),
            window,
            // Verification accepts the current and previous windows,
            // so the code outlives its own window by one step.
            expires_at_ms: ((window + 2) * self.step_secs * 1000) as i64,
        })
    }

    /// Verify a submitted code at the current time
    ///
    /// Returns the matched window on success, `None` if the code is
    /// wrong, expired, or already consumed.
    pub async fn verify(&self, account_id: &AccountId, code: &str) -> AuthResult<Option<u64>> {
        self.verify_at(account_id, code, now_secs()).await
    }

    /// Verify a submitted code at an explicit time
    pub async fn verify_at(
        &self,
        account_id: &AccountId,
        code: &str,
        now_secs: u64,
    ) -> AuthResult<Option<u64>> {
        if code.len() != self.digits || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(None);
        }

        let totp = self.account_totp(account_id)?;
        let consumed = self.marks.last_consumed_window(account_id).await?;
        let current = now_secs / self.step_secs;

        // Current window plus one step of skew for codes issued just
        // before a boundary.
        let mut matched = None;
        for window in [current.saturating_sub(1), current] {
            let expected = totp.generate(window * self.step_secs);
            if constant_time_eq(expected.as_bytes(), code.as_bytes()) {
                matched = Some(window);
            }
        }

        match matched {
            Some(window) if consumed.is_none_or(|mark| window > mark) => Ok(Some(window)),
            _ => Ok(None),
        }
    }

    /// Record a verified window as consumed
    pub async fn consume(&self, account_id: &AccountId, window: u64) -> AuthResult<()> {
        self.marks.mark_consumed(account_id, window).await
    }

    /// Burn CPU on a code check for a nonexistent account
    ///
    /// Called when a reset is confirmed for an unknown email, so the
    /// response timing does not reveal whether the account exists.
    pub async fn decoy_verify(&self, code: &str, now_secs: u64) -> AuthResult<()> {
        let decoy = AccountId::from_uuid(Uuid::nil());
        let _ = self.verify_at(&decoy, code, now_secs).await?;
        Ok(())
    }

    fn account_totp(&self, account_id: &AccountId) -> AuthResult<TOTP> {
        // Per-account key: nobody holding one account's code material
        // learns anything about another's.
        let key = hmac_sha256(&self.secret, account_id.as_uuid().as_bytes());

        TOTP::new(Algorithm::SHA1, self.digits, 1, self.step_secs, key.to_vec())
            .map_err(|e| AuthError::Internal(format!("Failed to create code generator: {}", e)))
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryAccountRepository;
    use platform::crypto::random_bytes;

    const STEP: u64 = 900;

    fn service() -> ResetCodeService<MemoryAccountRepository> {
        ResetCodeService::new(
            Arc::new(MemoryAccountRepository::new()),
            random_bytes(32),
            STEP,
            6,
        )
    }

    #[tokio::test]
    async fn test_issue_then_verify() {
        let service = service();
        let account_id = AccountId::new();
        let now = 1_700_000_000;

        let issued = service.issue_at(&account_id, now).unwrap();
        assert_eq!(issued.code.len(), 6);
        assert!(issued.code.bytes().all(|b| b.is_ascii_digit()));

        let window = service
            .verify_at(&account_id, &issued.code, now + 60)
            .await
            .unwrap();
        assert_eq!(window, Some(issued.window));
    }

    #[tokio::test]
    async fn test_code_bound_to_account() {
        let service = service();
        let alice = AccountId::new();
        let bob = AccountId::new();
        let now = 1_700_000_000;

        let issued = service.issue_at(&alice, now).unwrap();
        let result = service.verify_at(&bob, &issued.code, now).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_code_expires_after_window_passes() {
        let service = service();
        let account_id = AccountId::new();
        let now = 1_700_000_000;

        let issued = service.issue_at(&account_id, now).unwrap();

        // Still good one step later (skew)
        let later = now + STEP;
        assert!(
            service
                .verify_at(&account_id, &issued.code, later)
                .await
                .unwrap()
                .is_some()
        );

        // Dead two steps later
        let expired = now + 2 * STEP;
        assert_eq!(
            service
                .verify_at(&account_id, &issued.code, expired)
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_consumed_code_cannot_replay() {
        let service = service();
        let account_id = AccountId::new();
        let now = 1_700_000_000;

        let issued = service.issue_at(&account_id, now).unwrap();
        let window = service
            .verify_at(&account_id, &issued.code, now)
            .await
            .unwrap()
            .unwrap();

        service.consume(&account_id, window).await.unwrap();

        assert_eq!(
            service
                .verify_at(&account_id, &issued.code, now)
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_next_window_code_valid_after_consume() {
        let service = service();
        let account_id = AccountId::new();
        let now = 1_700_000_000;

        let first = service.issue_at(&account_id, now).unwrap();
        service.consume(&account_id, first.window).await.unwrap();

        let later = now + STEP;
        let second = service.issue_at(&account_id, later).unwrap();
        assert_ne!(first.window, second.window);

        assert!(
            service
                .verify_at(&account_id, &second.code, later)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_malformed_codes_rejected() {
        let service = service();
        let account_id = AccountId::new();
        let now = 1_700_000_000;

        for bad in ["", "12345", "1234567", "12a456", "......"] {
            assert_eq!(
                service.verify_at(&account_id, bad, now).await.unwrap(),
                None
            );
        }
    }
}
