//! Update Post Use Case
//!
//! Partial update by the author.

use std::sync::Arc;

use kernel::id::PostId;

use crate::application::config::BoardConfig;
use crate::domain::entity::post::{Post, PostPatch};
use crate::domain::guard::{Actor, ensure_owner, ensure_usable_identity};
use crate::domain::repository::PostRepository;
use crate::error::{BoardError, BoardResult};

pub struct UpdatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
    config: Arc<BoardConfig>,
}

impl<R> UpdatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BoardConfig>) -> Self {
        Self { repo, config }
    }

    /// Ownership is checked before the patch is validated.
    pub async fn execute(&self, post_id: &PostId, actor: &Actor, patch: PostPatch) -> BoardResult<Post> {
        let mut post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(BoardError::PostNotFound)?;

        ensure_owner(actor, &post)?;
        ensure_usable_identity(actor)?;

        post.apply(patch, self.config.max_title_length)?;
        self.repo.update(&post).await?;

        tracing::info!(post_id = %post.post_id, user_id = %actor.user_id, "Post updated");

        Ok(post)
    }
}
