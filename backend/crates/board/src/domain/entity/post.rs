//! Post Entity

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::id::{PostId, UserId};

use crate::domain::guard::Authored;
use crate::domain::value_object::{
    author::AuthorSnapshot,
    like_set::LikeSet,
    text::{bounded_text, normalize_tags, optional_text, required_text},
};

/// Post entity
///
/// `author` never changes after creation. The like count is always
/// `likes.len()`.
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub category_id: String,
    pub title: String,
    /// Rich text (HTML)
    pub content: String,
    pub excerpt: String,
    pub author: AuthorSnapshot,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub likes: LikeSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when writing a new post
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub category_id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub category_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub thumbnail_url: Option<String>,
}

impl Post {
    pub fn new(draft: PostDraft, author: AuthorSnapshot, max_title_length: usize) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            post_id: PostId::new(),
            category_id: required_text("Category", &draft.category_id)?,
            title: bounded_text("Title", &draft.title, max_title_length)?,
            content: required_text("Content", &draft.content)?,
            excerpt: required_text("Excerpt", &draft.excerpt)?,
            author,
            tags: normalize_tags(draft.tags),
            thumbnail_url: optional_text(draft.thumbnail_url),
            likes: LikeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply every present field; validated as a whole before anything changes.
    ///
    /// A blank `thumbnail_url` clears the thumbnail.
    pub fn apply(&mut self, patch: PostPatch, max_title_length: usize) -> AppResult<()> {
        let category_id = patch
            .category_id
            .map(|v| required_text("Category", &v))
            .transpose()?;
        let title = patch
            .title
            .map(|v| bounded_text("Title", &v, max_title_length))
            .transpose()?;
        let content = patch
            .content
            .map(|v| required_text("Content", &v))
            .transpose()?;
        let excerpt = patch
            .excerpt
            .map(|v| required_text("Excerpt", &v))
            .transpose()?;

        if let Some(v) = category_id {
            self.category_id = v;
        }
        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = content {
            self.content = v;
        }
        if let Some(v) = excerpt {
            self.excerpt = v;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(thumbnail_url) = patch.thumbnail_url {
            self.thumbnail_url = optional_text(Some(thumbnail_url));
        }

        self.updated_at = Utc::now();
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

impl Authored for Post {
    fn author_id(&self) -> &UserId {
        &self.author.author_id
    }
}
