//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Enumeration-sensitive failures never reach this type as `NotFound`:
//! the use cases map "no such account" to either a generic success
//! (forgot-password) or [`AuthError::InvalidToken`] (reset-password)
//! before errors cross the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration input was malformed (email, display name, phone)
    #[error("{0}")]
    Validation(String),

    /// Email is already registered
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Password rejected by the password policy
    #[error("Password rejected: {0}")]
    WeakPassword(String),

    /// Reset code is wrong, expired, already consumed, or the account
    /// does not exist (never distinguished externally)
    #[error("Invalid or expired reset code")]
    InvalidToken,

    /// Rate limit window exhausted for this client
    #[error("Too many requests, please try again later")]
    RateLimited,

    /// Session token missing, malformed, tampered, or expired
    #[error("Session is invalid or expired")]
    SessionInvalid,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_)
            | AuthError::DuplicateEmail
            | AuthError::WeakPassword(_)
            | AuthError::InvalidToken => StatusCode::BAD_REQUEST,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::DuplicateEmail
            | AuthError::WeakPassword(_)
            | AuthError::InvalidToken => ErrorKind::BadRequest,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server errors are replaced with a generic message; the original
    /// error has already been logged with full detail.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "An internal error occurred")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::RateLimited => {
                tracing::warn!("Rate limit exceeded");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected password reset attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuthError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::DuplicateEmail.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidToken.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AuthError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_are_generic_outward() {
        let err = AuthError::Internal("connection pool exploded".into());
        let app = err.to_app_error();
        assert!(!app.message().contains("pool"));
    }
}
