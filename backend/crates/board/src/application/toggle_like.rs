//! Toggle Like Use Cases
//!
//! Both directions are idempotent: liking twice or unliking something never
//! liked leaves the set unchanged and skips the write.

use std::sync::Arc;

use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BoardError, BoardResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

pub struct TogglePostLikeUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> TogglePostLikeUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        post_id: &PostId,
        user_id: UserId,
        action: LikeAction,
    ) -> BoardResult<Post> {
        let mut post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(BoardError::PostNotFound)?;

        let changed = match action {
            LikeAction::Like => post.like(user_id),
            LikeAction::Unlike => post.unlike(&user_id),
        };

        if changed {
            self.repo.save_likes(&post).await?;
            tracing::info!(
                post_id = %post_id,
                user_id = %user_id,
                action = ?action,
                likes_count = post.likes_count(),
                "Post like toggled"
            );
        }

        Ok(post)
    }
}

pub struct ToggleCommentLikeUseCase<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
}

impl<R> ToggleCommentLikeUseCase<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
        user_id: UserId,
        action: LikeAction,
    ) -> BoardResult<Comment> {
        let mut comment = self
            .repo
            .find_in_post(post_id, comment_id)
            .await?
            .ok_or(BoardError::CommentNotFound)?;

        let changed = match action {
            LikeAction::Like => comment.like(user_id),
            LikeAction::Unlike => comment.unlike(&user_id),
        };

        if changed {
            self.repo.save_likes(&comment).await?;
            tracing::info!(
                comment_id = %comment_id,
                user_id = %user_id,
                action = ?action,
                likes_count = comment.likes_count(),
                "Comment like toggled"
            );
        }

        Ok(comment)
    }
}
