//! Application Layer
//!
//! One use case per operation.

pub mod config;
pub mod create_comment;
pub mod create_post;
pub mod delete_comment;
pub mod delete_post;
pub mod find_posts;
pub mod get_post;
pub mod list_comments;
pub mod toggle_like;
pub mod update_comment;
pub mod update_post;

// Re-exports
pub use config::BoardConfig;
pub use create_comment::{CreateCommentInput, CreateCommentUseCase};
pub use create_post::CreatePostUseCase;
pub use delete_comment::DeleteCommentUseCase;
pub use delete_post::DeletePostUseCase;
pub use find_posts::{FeedQuery, FindPostsUseCase};
pub use get_post::GetPostUseCase;
pub use list_comments::ListCommentsUseCase;
pub use toggle_like::{LikeAction, ToggleCommentLikeUseCase, TogglePostLikeUseCase};
pub use update_comment::UpdateCommentUseCase;
pub use update_post::UpdatePostUseCase;
