//! List Comments Use Case
//!
//! Flat list and threaded view of a post's comments.

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entity::comment::Comment;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::services::comment_thread::{CommentTree, sort_thread};
use crate::error::{BoardError, BoardResult};

pub struct ListCommentsUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    repo: Arc<R>,
}

impl<R> ListCommentsUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `created_at` ascending; `PostNotFound` for an unknown post
    pub async fn execute(&self, post_id: &PostId) -> BoardResult<Vec<Comment>> {
        PostRepository::find_by_id(self.repo.as_ref(), post_id)
            .await?
            .ok_or(BoardError::PostNotFound)?;

        let mut comments = self.repo.find_by_post(post_id).await?;
        sort_thread(&mut comments);
        Ok(comments)
    }

    pub async fn tree(&self, post_id: &PostId) -> BoardResult<CommentTree> {
        self.execute(post_id).await.map(CommentTree::assemble)
    }
}
