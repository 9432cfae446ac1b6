//! Auth (Credential Lifecycle) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and notifier traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and notifier implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Account registration with email + password and immediate sign-in
//! - Password recovery via a time-limited one-time 6-digit code
//! - Stateless HMAC-signed session tokens carried in a locked-down cookie
//! - Per-client fixed-window rate limiting on the recovery endpoints
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, policy-checked and zeroized
//! - Reset codes derived per account and time window, never persisted
//! - Account existence is never observable from recovery responses
//! - Consumed reset codes are replay-proof within their validity window

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
