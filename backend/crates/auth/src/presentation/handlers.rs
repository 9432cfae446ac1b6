//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::{extract_client_ip, partition_key};
use platform::rate_limit::RateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, ConfirmResetUseCase, RegisterInput, RegisterUseCase, RequestResetUseCase,
    ResetCodeService, SessionIssuer,
};
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AccountRepository, ResetMarkRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ForgotPasswordRequest, MessageResponse, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, SessionStatusResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, N, L> {
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub limiter: Arc<L>,
    pub config: Arc<AuthConfig>,
}

// Manual Clone: the fields are all Arcs, the type parameters need no
// Clone of their own.
impl<R, N, L> Clone for AuthAppState<R, N, L> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            notifier: Arc::clone(&self.notifier),
            limiter: Arc::clone(&self.limiter),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R, N, L> AuthAppState<R, N, L>
where
    R: AccountRepository + ResetMarkRepository + Send + Sync + 'static,
{
    fn sessions(&self) -> SessionIssuer {
        SessionIssuer::new(
            self.config.session_secret.clone(),
            self.config.session_ttl_secs,
        )
    }

    fn codes(&self) -> ResetCodeService<R> {
        ResetCodeService::new(
            self.repo.clone(),
            self.config.reset_secret.clone(),
            self.config.reset_code_step_secs,
            self.config.reset_code_digits,
        )
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, N, L>(
    State(state): State<AuthAppState<R, N, L>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + ResetMarkRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.sessions(), state.config.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        display_name: req.display_name,
        phone: req.phone,
    };

    let output = use_case.execute(input).await?;

    // Fresh account is signed in immediately
    let cookie = state.config.cookie_config().build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(RegisterResponse {
            account_id: output.account_id.into_uuid(),
        }),
    ))
}

// ============================================================================
// Forgot Password
// ============================================================================

/// POST /api/auth/forgot-password
pub async fn forgot_password<R, N, L>(
    State(state): State<AuthAppState<R, N, L>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + ResetMarkRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let partition = partition_key(client_ip);

    let use_case = RequestResetUseCase::new(
        state.repo.clone(),
        state.codes(),
        state.notifier.clone(),
        state.limiter.clone(),
        state.config.rate_limit.clone(),
    );

    use_case.execute(&req.email, &partition).await?;

    Ok(Json(MessageResponse::reset_requested()))
}

// ============================================================================
// Reset Password
// ============================================================================

/// POST /api/auth/reset-password
pub async fn reset_password<R, N, L>(
    State(state): State<AuthAppState<R, N, L>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + ResetMarkRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let partition = partition_key(client_ip);

    let use_case = ConfirmResetUseCase::new(
        state.repo.clone(),
        state.codes(),
        state.limiter.clone(),
        state.config.clone(),
    );

    use_case
        .execute(&req.email, &req.code, req.new_password, &partition)
        .await?;

    Ok(Json(MessageResponse::password_reset()))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R, N, L>(
    State(state): State<AuthAppState<R, N, L>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: AccountRepository + ResetMarkRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let token = extract_session_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.sessions());

    let session = match token {
        Some(token) => use_case.execute(&token).await.ok(),
        None => None,
    };

    match session {
        Some((account, claims)) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            account_id: Some(account.account_id.into_uuid()),
            display_name: Some(account.display_name.as_str().to_string()),
            expires_at_ms: Some(claims.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse::anonymous())),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Sessions are stateless, so logout is just clearing the cookie.
pub async fn logout<R, N, L>(
    State(state): State<AuthAppState<R, N, L>>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + ResetMarkRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let cookie = state.config.cookie_config().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, name)
}
