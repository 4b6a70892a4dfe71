//! Create Post Use Case

use std::sync::Arc;

use crate::application::config::BoardConfig;
use crate::domain::entity::post::{Post, PostDraft};
use crate::domain::guard::{Actor, ensure_usable_identity};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::author::AuthorSnapshot;
use crate::error::BoardResult;

pub struct CreatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
    config: Arc<BoardConfig>,
}

impl<R> CreatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BoardConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, actor: &Actor, draft: PostDraft) -> BoardResult<Post> {
        ensure_usable_identity(actor)?;

        let post = Post::new(draft, AuthorSnapshot::of(actor), self.config.max_title_length)?;
        self.repo.create(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            user_id = %actor.user_id,
            category_id = %post.category_id,
            "Post created"
        );

        Ok(post)
    }
}
