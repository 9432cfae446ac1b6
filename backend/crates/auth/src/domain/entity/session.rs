//! Session Claims
//!
//! What a session token asserts once its signature checks out. There is
//! no server-side session record: validity is carried entirely by the
//! signed token, and expiry is enforced lazily at validation time.

use chrono::{Duration, Utc};

use crate::domain::value_object::account_id::AccountId;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// The authenticated account
    pub account_id: AccountId,
    /// Issue time (Unix timestamp ms)
    pub issued_at_ms: i64,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl SessionClaims {
    /// Create claims for a fresh session with the given TTL
    pub fn new(account_id: AccountId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            account_id,
            issued_at_ms: now.timestamp_millis(),
            expires_at_ms: (now + ttl).timestamp_millis(),
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        (self.expires_at_ms - Utc::now().timestamp_millis()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_not_expired() {
        let claims = SessionClaims::new(AccountId::new(), Duration::days(7));
        assert!(!claims.is_expired());
        assert!(claims.remaining_ms() > 0);
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let mut claims = SessionClaims::new(AccountId::new(), Duration::days(7));
        claims.expires_at_ms = Utc::now().timestamp_millis() - 1_000;
        assert!(claims.is_expired());
        assert_eq!(claims.remaining_ms(), 0);
    }
}
