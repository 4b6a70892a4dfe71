//! Board Router
//!
//! Mounted under `/posts`. Reads are public; writes need a bearer token.

use axum::{
    Router,
    routing::{get, patch, post},
};
use identity::SessionTokenService;

use crate::application::config::BoardConfig;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::infra::postgres::PgBoardRepository;
use crate::presentation::handlers::{self, BoardAppState};

/// Create the Board router with PostgreSQL repository
pub fn board_router(
    repo: PgBoardRepository,
    config: BoardConfig,
    sessions: SessionTokenService,
) -> Router {
    board_router_generic(repo, config, sessions)
}

/// Create a generic Board router for any repository implementation
pub fn board_router_generic<R>(repo: R, config: BoardConfig, sessions: SessionTokenService) -> Router
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let state = BoardAppState::new(repo, config, sessions);

    Router::new()
        .route(
            "/",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route(
            "/{post_id}",
            get(handlers::get_post::<R>)
                .patch(handlers::update_post::<R>)
                .delete(handlers::delete_post::<R>),
        )
        .route(
            "/{post_id}/likes",
            post(handlers::like_post::<R>).delete(handlers::unlike_post::<R>),
        )
        .route(
            "/{post_id}/comments",
            get(handlers::list_comments::<R>).post(handlers::create_comment::<R>),
        )
        .route("/{post_id}/comments/tree", get(handlers::comment_tree::<R>))
        .route(
            "/{post_id}/comments/{comment_id}",
            patch(handlers::update_comment::<R>).delete(handlers::delete_comment::<R>),
        )
        .route(
            "/{post_id}/comments/{comment_id}/likes",
            post(handlers::like_comment::<R>).delete(handlers::unlike_comment::<R>),
        )
        .with_state(state)
}
