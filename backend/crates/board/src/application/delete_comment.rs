//! Delete Comment Use Case
//!
//! Deletes the comment together with its whole reply subtree.

use std::sync::Arc;

use kernel::id::{CommentId, PostId};

use crate::domain::guard::{Actor, ensure_owner};
use crate::domain::repository::CommentRepository;
use crate::domain::services::comment_thread::collect_subtree;
use crate::error::{BoardError, BoardResult};

pub struct DeleteCommentUseCase<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteCommentUseCase<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the number of comments removed.
    ///
    /// Not transactional: a reply added after the thread links are read
    /// survives, and a store error propagates as-is.
    pub async fn execute(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
        actor: &Actor,
    ) -> BoardResult<u64> {
        let comment = self
            .repo
            .find_in_post(post_id, comment_id)
            .await?
            .ok_or(BoardError::CommentNotFound)?;

        ensure_owner(actor, &comment)?;

        let links = self.repo.find_thread_links(post_id).await?;
        let doomed = collect_subtree(comment.comment_id, &links);
        let deleted = self.repo.delete_many(post_id, &doomed).await?;

        tracing::info!(
            comment_id = %comment_id,
            post_id = %post_id,
            deleted,
            "Comment subtree deleted"
        );

        Ok(deleted)
    }
}
