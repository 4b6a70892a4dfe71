//! Update Comment Use Case
//!
//! The author may change the content; nothing else.

use std::sync::Arc;

use kernel::id::{CommentId, PostId};

use crate::application::config::BoardConfig;
use crate::domain::entity::comment::Comment;
use crate::domain::guard::{Actor, ensure_owner, ensure_usable_identity};
use crate::domain::repository::CommentRepository;
use crate::error::{BoardError, BoardResult};

pub struct UpdateCommentUseCase<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
    config: Arc<BoardConfig>,
}

impl<R> UpdateCommentUseCase<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BoardConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
        actor: &Actor,
        content: &str,
    ) -> BoardResult<Comment> {
        let mut comment = self
            .repo
            .find_in_post(post_id, comment_id)
            .await?
            .ok_or(BoardError::CommentNotFound)?;

        ensure_owner(actor, &comment)?;
        ensure_usable_identity(actor)?;

        comment.edit(content, self.config.max_comment_length)?;
        self.repo.update(&comment).await?;

        tracing::info!(comment_id = %comment_id, post_id = %post_id, "Comment updated");

        Ok(comment)
    }
}
