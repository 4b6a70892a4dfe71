//! HTTP Handlers
//!
//! Path ids arrive as text; one that does not parse cannot name an
//! existing entity and is reported as not found.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, Path, Query, State};
use axum::http::StatusCode;
use identity::{CurrentUser, SessionClaims, SessionTokenService};
use kernel::id::{CommentId, PostId};

use crate::application::config::BoardConfig;
use crate::application::{
    CreateCommentInput, CreateCommentUseCase, CreatePostUseCase, DeleteCommentUseCase,
    DeletePostUseCase, FindPostsUseCase, GetPostUseCase, LikeAction, ListCommentsUseCase,
    ToggleCommentLikeUseCase, TogglePostLikeUseCase, UpdateCommentUseCase, UpdatePostUseCase,
};
use crate::domain::guard::Actor;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BoardError, BoardResult};
use crate::presentation::dto::{
    CommentResponse, CommentTreeResponse, CreateCommentRequest, CreatePostRequest, FeedParams,
    FeedResponse, PostResponse, UpdateCommentRequest, UpdatePostRequest,
};

/// Shared state for board handlers
#[derive(Clone)]
pub struct BoardAppState<R>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<BoardConfig>,
    pub sessions: SessionTokenService,
}

impl<R> BoardAppState<R>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: BoardConfig, sessions: SessionTokenService) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            sessions,
        }
    }
}

impl<R> FromRef<BoardAppState<R>> for SessionTokenService
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &BoardAppState<R>) -> Self {
        state.sessions.clone()
    }
}

impl From<&SessionClaims> for Actor {
    fn from(claims: &SessionClaims) -> Self {
        Actor {
            user_id: claims.user_id(),
            display_name: claims.display_name.clone(),
            avatar_url: claims.avatar_url.clone(),
        }
    }
}

fn post_id(raw: &str) -> BoardResult<PostId> {
    raw.parse().map_err(|_| BoardError::PostNotFound)
}

fn comment_id(raw: &str) -> BoardResult<CommentId> {
    raw.parse().map_err(|_| BoardError::CommentNotFound)
}

// ============================================================================
// Feed
// ============================================================================

/// GET /posts
pub async fn list_posts<R>(
    State(state): State<BoardAppState<R>>,
    Query(params): Query<FeedParams>,
) -> BoardResult<Json<FeedResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = FindPostsUseCase::new(state.repo.clone(), state.config.clone());
    let page = use_case.execute(params.into()).await?;

    Ok(Json(page.into()))
}

// ============================================================================
// Posts
// ============================================================================

/// GET /posts/{post_id}
pub async fn get_post<R>(
    State(state): State<BoardAppState<R>>,
    Path(raw_post_id): Path<String>,
) -> BoardResult<Json<PostResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetPostUseCase::new(state.repo.clone());
    let post = use_case.execute(&post_id(&raw_post_id)?).await?;

    Ok(Json(post.into()))
}

/// POST /posts
pub async fn create_post<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<CreatePostRequest>,
) -> BoardResult<(StatusCode, Json<PostResponse>)>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(state.repo.clone(), state.config.clone());
    let post = use_case.execute(&Actor::from(&claims), req.into()).await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// PATCH /posts/{post_id}
pub async fn update_post<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path(raw_post_id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> BoardResult<Json<PostResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdatePostUseCase::new(state.repo.clone(), state.config.clone());
    let post = use_case
        .execute(&post_id(&raw_post_id)?, &Actor::from(&claims), req.into())
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /posts/{post_id}
pub async fn delete_post<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path(raw_post_id): Path<String>,
) -> BoardResult<StatusCode>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeletePostUseCase::new(state.repo.clone());
    use_case
        .execute(&post_id(&raw_post_id)?, &Actor::from(&claims))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Post Likes
// ============================================================================

async fn toggle_post_like<R>(
    state: BoardAppState<R>,
    claims: SessionClaims,
    raw_post_id: String,
    action: LikeAction,
) -> BoardResult<Json<PostResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = TogglePostLikeUseCase::new(state.repo.clone());
    let post = use_case
        .execute(&post_id(&raw_post_id)?, claims.user_id(), action)
        .await?;

    Ok(Json(post.into()))
}

/// POST /posts/{post_id}/likes
pub async fn like_post<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path(raw_post_id): Path<String>,
) -> BoardResult<Json<PostResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    toggle_post_like(state, claims, raw_post_id, LikeAction::Like).await
}

/// DELETE /posts/{post_id}/likes
pub async fn unlike_post<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path(raw_post_id): Path<String>,
) -> BoardResult<Json<PostResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    toggle_post_like(state, claims, raw_post_id, LikeAction::Unlike).await
}

// ============================================================================
// Comments
// ============================================================================

/// GET /posts/{post_id}/comments
pub async fn list_comments<R>(
    State(state): State<BoardAppState<R>>,
    Path(raw_post_id): Path<String>,
) -> BoardResult<Json<Vec<CommentResponse>>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListCommentsUseCase::new(state.repo.clone());
    let comments = use_case.execute(&post_id(&raw_post_id)?).await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// GET /posts/{post_id}/comments/tree
pub async fn comment_tree<R>(
    State(state): State<BoardAppState<R>>,
    Path(raw_post_id): Path<String>,
) -> BoardResult<Json<CommentTreeResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListCommentsUseCase::new(state.repo.clone());
    let tree = use_case.tree(&post_id(&raw_post_id)?).await?;

    Ok(Json(tree.into()))
}

/// POST /posts/{post_id}/comments
pub async fn create_comment<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path(raw_post_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> BoardResult<(StatusCode, Json<CommentResponse>)>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateCommentUseCase::new(state.repo.clone(), state.config.clone());

    let input = CreateCommentInput {
        content: req.content,
        parent_id: req.parent_id,
    };

    let comment = use_case
        .execute(&post_id(&raw_post_id)?, &Actor::from(&claims), input)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// PATCH /posts/{post_id}/comments/{comment_id}
pub async fn update_comment<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path((raw_post_id, raw_comment_id)): Path<(String, String)>,
    Json(req): Json<UpdateCommentRequest>,
) -> BoardResult<Json<CommentResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateCommentUseCase::new(state.repo.clone(), state.config.clone());
    let comment = use_case
        .execute(
            &post_id(&raw_post_id)?,
            &comment_id(&raw_comment_id)?,
            &Actor::from(&claims),
            &req.content,
        )
        .await?;

    Ok(Json(comment.into()))
}

/// DELETE /posts/{post_id}/comments/{comment_id}
///
/// Removes the whole reply subtree.
pub async fn delete_comment<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path((raw_post_id, raw_comment_id)): Path<(String, String)>,
) -> BoardResult<StatusCode>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteCommentUseCase::new(state.repo.clone());
    use_case
        .execute(
            &post_id(&raw_post_id)?,
            &comment_id(&raw_comment_id)?,
            &Actor::from(&claims),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comment Likes
// ============================================================================

async fn toggle_comment_like<R>(
    state: BoardAppState<R>,
    claims: SessionClaims,
    (raw_post_id, raw_comment_id): (String, String),
    action: LikeAction,
) -> BoardResult<Json<CommentResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let use_case = ToggleCommentLikeUseCase::new(state.repo.clone());
    let comment = use_case
        .execute(
            &post_id(&raw_post_id)?,
            &comment_id(&raw_comment_id)?,
            claims.user_id(),
            action,
        )
        .await?;

    Ok(Json(comment.into()))
}

/// POST /posts/{post_id}/comments/{comment_id}/likes
pub async fn like_comment<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path(ids): Path<(String, String)>,
) -> BoardResult<Json<CommentResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    toggle_comment_like(state, claims, ids, LikeAction::Like).await
}

/// DELETE /posts/{post_id}/comments/{comment_id}/likes
pub async fn unlike_comment<R>(
    State(state): State<BoardAppState<R>>,
    CurrentUser(claims): CurrentUser,
    Path(ids): Path<(String, String)>,
) -> BoardResult<Json<CommentResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    toggle_comment_like(state, claims, ids, LikeAction::Unlike).await
}
