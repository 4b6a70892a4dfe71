//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::{
    AuthenticateLocalInput, AuthenticateLocalUseCase, RegisterLocalInput, RegisterLocalUseCase,
    SessionTokenService, UpdateProfileUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::IdentityResult;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use crate::presentation::extractor::CurrentUser;

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<IdentityConfig>,
    pub sessions: SessionTokenService,
}

impl<R> IdentityAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: IdentityConfig) -> Self {
        let sessions = SessionTokenService::new(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            sessions,
        }
    }
}

impl<R> FromRef<IdentityAppState<R>> for SessionTokenService
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &IdentityAppState<R>) -> Self {
        state.sessions.clone()
    }
}

// ============================================================================
// Local Register
// ============================================================================

/// POST /auth/local/register
pub async fn register_local<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterLocalUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterLocalInput {
        username: req.username,
        password: req.password,
        display_name: req.display_name,
        email: req.email,
    };

    let user = use_case.execute(input).await?;
    let session = state.sessions.issue(&user)?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

// ============================================================================
// Local Login
// ============================================================================

/// POST /auth/local/login
pub async fn login_local<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthenticateLocalUseCase::new(state.repo.clone(), state.config.clone());

    let input = AuthenticateLocalInput {
        identifier: req.identifier,
        password: req.password,
    };

    let user = use_case.execute(input).await?;
    let session = state.sessions.issue(&user)?;

    Ok(Json(session.into()))
}

// ============================================================================
// Me
// ============================================================================

/// GET /auth/me
pub async fn me(CurrentUser(claims): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&claims))
}

// ============================================================================
// Profile
// ============================================================================

/// PATCH /auth/profile
///
/// Returns a fresh token so the client's snapshot carries the new name.
pub async fn update_profile<R>(
    State(state): State<IdentityAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> IdentityResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone());

    let user = use_case
        .execute(&claims.user_id(), &req.display_name)
        .await?;
    let session = state.sessions.issue(&user)?;

    Ok(Json(session.into()))
}
