//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::rate_limit::{MemoryRateLimitStore, RateLimitStore};

use crate::application::config::AuthConfig;
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AccountRepository, ResetMarkRepository};
use crate::infra::email::LogNotifier;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the auth router with PostgreSQL storage, log-only
/// notifications, and an in-process rate limiter
pub fn auth_router(repo: PgAccountRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, LogNotifier::new(), MemoryRateLimitStore::new(), config)
}

/// Create an auth router over any set of implementations
pub fn auth_router_generic<R, N, L>(repo: R, notifier: N, limiter: L, config: AuthConfig) -> Router
where
    R: AccountRepository + ResetMarkRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        notifier: Arc::new(notifier),
        limiter: Arc::new(limiter),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, N, L>))
        .route("/forgot-password", post(handlers::forgot_password::<R, N, L>))
        .route("/reset-password", post(handlers::reset_password::<R, N, L>))
        .route("/session", get(handlers::session_status::<R, N, L>))
        .route("/logout", post(handlers::logout::<R, N, L>))
        .with_state(state)
}
