//! Get Post Use Case

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BoardError, BoardResult};

pub struct GetPostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> GetPostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, post_id: &PostId) -> BoardResult<Post> {
        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or(BoardError::PostNotFound)
    }
}
