//! Session Token Issuance and Validation
//!
//! Stateless signed tokens. A token is two URL-safe base64 segments
//! joined by a dot: the claims payload and an HMAC-SHA256 tag over it.
//! There is no server-side session table, so there is nothing to look
//! up, invalidate, or sweep; logout is the client discarding its
//! cookie.
//!
//! The payload is readable by the client (it is only encoded, not
//! encrypted) and carries nothing but the account UUID and two
//! timestamps. Tampering with any byte invalidates the tag.

use chrono::Duration;
use uuid::Uuid;

use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};

use crate::domain::entity::session::SessionClaims;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AuthError, AuthResult};

/// Issues and validates signed session tokens
#[derive(Clone)]
pub struct SessionIssuer {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl SessionIssuer {
    pub fn new(secret: Vec<u8>, ttl_secs: i64) -> Self {
        Self { secret, ttl_secs }
    }

    /// Issue a token for an account
    pub fn issue(&self, account_id: &AccountId) -> (String, SessionClaims) {
        let claims = SessionClaims::new(*account_id, Duration::seconds(self.ttl_secs));
        let token = self.encode(&claims);
        (token, claims)
    }

    /// Encode claims into a signed token
    ///
    /// Exposed within the crate so tests can mint tokens with
    /// arbitrary expiry.
    pub(crate) fn encode(&self, claims: &SessionClaims) -> String {
        let payload = format!(
            "{}:{}:{}",
            claims.account_id.as_uuid(),
            claims.issued_at_ms,
            claims.expires_at_ms
        );
        let tag = hmac_sha256(&self.secret, payload.as_bytes());

        format!(
            "{}.{}",
            to_base64url(payload.as_bytes()),
            to_base64url(&tag)
        )
    }

    /// Validate a token and return its claims
    ///
    /// Fails with [`AuthError::SessionInvalid`] on any defect:
    /// malformed structure, bad signature, unparseable claims, or
    /// expiry. Callers get no finer-grained reason.
    pub fn validate(&self, token: &str) -> AuthResult<SessionClaims> {
        let claims = self.decode(token)?;

        if claims.is_expired() {
            return Err(AuthError::SessionInvalid);
        }

        Ok(claims)
    }

    fn decode(&self, token: &str) -> AuthResult<SessionClaims> {
        let (payload_b64, tag_b64) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;

        let payload = from_base64url(payload_b64).map_err(|_| AuthError::SessionInvalid)?;
        let tag = from_base64url(tag_b64).map_err(|_| AuthError::SessionInvalid)?;

        let expected = hmac_sha256(&self.secret, &payload);
        if !constant_time_eq(&expected, &tag) {
            return Err(AuthError::SessionInvalid);
        }

        // Signature checks out; the payload is our own encoding
        let payload = String::from_utf8(payload).map_err(|_| AuthError::SessionInvalid)?;
        let mut parts = payload.splitn(3, ':');

        let uuid = parts
            .next()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or(AuthError::SessionInvalid)?;
        let issued_at_ms = parts
            .next()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(AuthError::SessionInvalid)?;
        let expires_at_ms = parts
            .next()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(AuthError::SessionInvalid)?;

        Ok(SessionClaims {
            account_id: AccountId::from_uuid(uuid),
            issued_at_ms,
            expires_at_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use platform::crypto::random_bytes;

    fn issuer() -> SessionIssuer {
        SessionIssuer::new(random_bytes(32), 7 * 24 * 60 * 60)
    }

    #[test]
    fn test_issue_then_validate() {
        let issuer = issuer();
        let account_id = AccountId::new();

        let (token, claims) = issuer.issue(&account_id);
        let validated = issuer.validate(&token).unwrap();

        assert_eq!(validated.account_id, account_id);
        assert_eq!(validated.expires_at_ms, claims.expires_at_ms);
    }

    #[test]
    fn test_ttl_is_seven_days() {
        let issuer = issuer();
        let (_, claims) = issuer.issue(&AccountId::new());

        let ttl_ms = claims.expires_at_ms - claims.issued_at_ms;
        assert_eq!(ttl_ms, 7 * 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = issuer();
        let (token, _) = issuer.issue(&AccountId::new());

        // Flip a character in the payload segment
        let mut chars: Vec<char> = token.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert!(matches!(
            issuer.validate(&tampered),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer_a = issuer();
        let issuer_b = issuer();

        let (token, _) = issuer_a.issue(&AccountId::new());
        assert!(issuer_b.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer();
        let now = Utc::now().timestamp_millis();
        let claims = SessionClaims {
            account_id: AccountId::new(),
            issued_at_ms: now - 10_000,
            expires_at_ms: now - 1_000,
        };

        let token = issuer.encode(&claims);
        assert!(matches!(
            issuer.validate(&token),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = issuer();
        assert!(issuer.validate("").is_err());
        assert!(issuer.validate("no-dot-here").is_err());
        assert!(issuer.validate("a.b.c").is_err());
        assert!(issuer.validate("!!!.???").is_err());
    }
}
