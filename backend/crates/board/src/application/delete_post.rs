//! Delete Post Use Case
//!
//! Removes the post only; its comments are left in place.

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::guard::{Actor, ensure_owner};
use crate::domain::repository::PostRepository;
use crate::error::{BoardError, BoardResult};

pub struct DeletePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, post_id: &PostId, actor: &Actor) -> BoardResult<()> {
        let post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(BoardError::PostNotFound)?;

        ensure_owner(actor, &post)?;

        if !self.repo.delete(post_id).await? {
            return Err(BoardError::PostNotFound);
        }

        tracing::info!(post_id = %post_id, user_id = %actor.user_id, "Post deleted");

        Ok(())
    }
}
