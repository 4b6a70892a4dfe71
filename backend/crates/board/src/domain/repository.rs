//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CommentId, PostId};

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::services::comment_thread::ThreadLink;
use crate::domain::value_object::feed_query::{PostFilter, SortBy};
use crate::error::BoardResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn create(&self, post: &Post) -> BoardResult<()>;

    async fn find_by_id(&self, post_id: &PostId) -> BoardResult<Option<Post>>;

    /// Persist editable fields and `updated_at`
    async fn update(&self, post: &Post) -> BoardResult<()>;

    /// Persist the like set only
    async fn save_likes(&self, post: &Post) -> BoardResult<()>;

    /// Returns `false` if nothing was deleted
    async fn delete(&self, post_id: &PostId) -> BoardResult<bool>;

    async fn count(&self, filter: &PostFilter) -> BoardResult<u64>;

    /// One sorted page of matching posts
    async fn find_page(
        &self,
        filter: &PostFilter,
        sort_by: SortBy,
        offset: u64,
        limit: u32,
    ) -> BoardResult<Vec<Post>>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create(&self, comment: &Comment) -> BoardResult<()>;

    /// Find a comment scoped to its post
    async fn find_in_post(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
    ) -> BoardResult<Option<Comment>>;

    /// All comments of a post, `created_at` ascending
    async fn find_by_post(&self, post_id: &PostId) -> BoardResult<Vec<Comment>>;

    /// Parent edges of every comment of a post
    async fn find_thread_links(&self, post_id: &PostId) -> BoardResult<Vec<ThreadLink>>;

    /// Persist content and `updated_at`
    async fn update(&self, comment: &Comment) -> BoardResult<()>;

    /// Persist the like set only
    async fn save_likes(&self, comment: &Comment) -> BoardResult<()>;

    /// Bulk delete; returns the number removed
    async fn delete_many(&self, post_id: &PostId, comment_ids: &[CommentId]) -> BoardResult<u64>;
}
