//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::guard::Authored;
use crate::domain::value_object::{author::AuthorSnapshot, like_set::LikeSet, text::bounded_text};

/// Comment entity
///
/// `post_id` and `parent_id` never change. A parent always belongs to the
/// same post and existed before the child, so threads cannot form cycles.
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
    pub author: AuthorSnapshot,
    pub content: String,
    pub likes: LikeSet,
    pub created_at: DateTime<Utc>,
    /// Set on the first edit
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(
        post_id: PostId,
        parent_id: Option<CommentId>,
        author: AuthorSnapshot,
        content: &str,
        max_length: usize,
    ) -> AppResult<Self> {
        Ok(Self {
            comment_id: CommentId::new(),
            post_id,
            parent_id,
            author,
            content: bounded_text("Comment", content, max_length)?,
            likes: LikeSet::new(),
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    pub fn edit(&mut self, content: &str, max_length: usize) -> AppResult<()> {
        self.content = bounded_text("Comment", content, max_length)?;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Returns `true` if the like set changed
    pub fn like(&mut self, user_id: UserId) -> bool {
        self.likes.add(user_id)
    }

    /// Returns `true` if the like set changed
    pub fn unlike(&mut self, user_id: &UserId) -> bool {
        self.likes.remove(user_id)
    }

    pub fn likes_count(&self) -> usize {
        self.likes.len()
    }
}

impl Authored for Comment {
    fn author_id(&self) -> &UserId {
        &self.author.author_id
    }
}
