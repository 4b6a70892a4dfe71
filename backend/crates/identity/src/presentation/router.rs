//! Identity Router

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::application::config::IdentityConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgIdentityRepository;
use crate::presentation::handlers::{self, IdentityAppState};

/// Create the Identity router with PostgreSQL repository
pub fn identity_router(repo: PgIdentityRepository, config: IdentityConfig) -> Router {
    identity_router_generic(repo, config)
}

/// Create a generic Identity router for any repository implementation
pub fn identity_router_generic<R>(repo: R, config: IdentityConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState::new(repo, config);

    Router::new()
        .route("/local/register", post(handlers::register_local::<R>))
        .route("/local/login", post(handlers::login_local::<R>))
        .route("/me", get(handlers::me))
        .route("/profile", patch(handlers::update_profile::<R>))
        .with_state(state)
}
