//! Create Comment Use Case

use std::sync::Arc;

use kernel::id::{CommentId, PostId};

use crate::application::config::BoardConfig;
use crate::domain::entity::comment::Comment;
use crate::domain::guard::{Actor, ensure_usable_identity};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::value_object::{author::AuthorSnapshot, text::bounded_text};
use crate::error::{BoardError, BoardResult};

pub struct CreateCommentInput {
    pub content: String,
    /// Unparsed; anything that does not resolve on this post is `ParentNotFound`
    pub parent_id: Option<String>,
}

pub struct CreateCommentUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    repo: Arc<R>,
    config: Arc<BoardConfig>,
}

impl<R> CreateCommentUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BoardConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        post_id: &PostId,
        actor: &Actor,
        input: CreateCommentInput,
    ) -> BoardResult<Comment> {
        PostRepository::find_by_id(self.repo.as_ref(), post_id)
            .await?
            .ok_or(BoardError::PostNotFound)?;

        bounded_text("Comment", &input.content, self.config.max_comment_length)?;
        ensure_usable_identity(actor)?;

        let parent_id = match input.parent_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(self.resolve_parent(post_id, raw).await?),
        };

        let comment = Comment::new(
            *post_id,
            parent_id,
            AuthorSnapshot::of(actor),
            &input.content,
            self.config.max_comment_length,
        )?;
        CommentRepository::create(self.repo.as_ref(), &comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %post_id,
            parent_id = ?comment.parent_id.map(|p| p.to_string()),
            user_id = %actor.user_id,
            "Comment created"
        );

        Ok(comment)
    }

    /// Parent must be a comment of the same post
    async fn resolve_parent(&self, post_id: &PostId, raw: &str) -> BoardResult<CommentId> {
        let parent_id: CommentId = raw.parse().map_err(|_| BoardError::ParentNotFound)?;
        self.repo
            .find_in_post(post_id, &parent_id)
            .await?
            .map(|parent| parent.comment_id)
            .ok_or(BoardError::ParentNotFound)
    }
}
