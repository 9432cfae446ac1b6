//! Auth Configuration

use platform::cookie::{CookieConfig, SameSite};
use platform::crypto::random_bytes;
use platform::rate_limit::RateLimitConfig;

/// Session lifetime: 7 days
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Reset code validity window: 15 minutes
pub const RESET_CODE_STEP_SECS: u64 = 15 * 60;

/// Reset code length
pub const RESET_CODE_DIGITS: usize = 6;

/// Auth module configuration
///
/// Secrets are raw byte strings, not passphrases. Both must stay
/// stable across restarts in production or every session and pending
/// reset code is invalidated.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Key for signing session tokens
    pub session_secret: Vec<u8>,
    /// Key for deriving per-account reset codes
    pub reset_secret: Vec<u8>,
    /// Session lifetime in seconds
    pub session_ttl_secs: i64,
    /// Reset code validity window in seconds
    pub reset_code_step_secs: u64,
    /// Reset code length in digits
    pub reset_code_digits: usize,
    /// Session cookie name
    pub session_cookie_name: String,
    /// Whether the session cookie requires HTTPS
    pub cookie_secure: bool,
    /// Optional application-wide password pepper
    pub password_pepper: Option<Vec<u8>>,
    /// Rate limit applied to the recovery endpoints
    pub rate_limit: RateLimitConfig,
}

impl AuthConfig {
    /// Build a config with freshly generated secrets
    ///
    /// Suitable for a single-instance deployment where losing sessions
    /// on restart is acceptable, and for tests.
    pub fn with_random_secrets() -> Self {
        Self {
            session_secret: random_bytes(32),
            reset_secret: random_bytes(32),
            session_ttl_secs: SESSION_TTL_SECS,
            reset_code_step_secs: RESET_CODE_STEP_SECS,
            reset_code_digits: RESET_CODE_DIGITS,
            session_cookie_name: "session".to_string(),
            cookie_secure: true,
            password_pepper: None,
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Development config: random secrets, cookie usable over plain HTTP
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Explicit secrets (production: load from the environment)
    pub fn with_secrets(session_secret: Vec<u8>, reset_secret: Vec<u8>) -> Self {
        Self {
            session_secret,
            reset_secret,
            ..Self::with_random_secrets()
        }
    }

    /// The pepper as a byte slice, if configured
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie settings for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl_secs),
        }
    }
}
