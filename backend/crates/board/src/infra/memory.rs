//! In-Memory Repository Implementation
//!
//! Backs tests and database-less runs. Filtering and ordering mirror the
//! SQL in `postgres.rs`.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{CommentId, PostId};
use tokio::sync::RwLock;

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::services::comment_thread::{ThreadLink, sort_thread};
use crate::domain::value_object::feed_query::{PostFilter, SortBy};
use crate::error::{BoardError, BoardResult};

#[derive(Clone, Default)]
pub struct InMemoryBoardRepository {
    posts: Arc<RwLock<HashMap<PostId, Post>>>,
    comments: Arc<RwLock<HashMap<CommentId, Comment>>>,
}

impl InMemoryBoardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn matching_posts(&self, filter: &PostFilter) -> Vec<Post> {
        self.posts
            .read()
            .await
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }
}

fn sort_posts(posts: &mut [Post], sort_by: SortBy) {
    match sort_by {
        SortBy::Latest => posts.sort_by_key(|p| Reverse((p.created_at, p.post_id))),
        SortBy::Popular => {
            posts.sort_by_key(|p| Reverse((p.likes_count(), p.created_at, p.post_id)))
        }
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for InMemoryBoardRepository {
    async fn create(&self, post: &Post) -> BoardResult<()> {
        self.posts.write().await.insert(post.post_id, post.clone());
        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BoardResult<Option<Post>> {
        Ok(self.posts.read().await.get(post_id).cloned())
    }

    async fn update(&self, post: &Post) -> BoardResult<()> {
        match self.posts.write().await.get_mut(&post.post_id) {
            Some(slot) => {
                let likes = std::mem::take(&mut slot.likes);
                *slot = Post {
                    likes,
                    ..post.clone()
                };
                Ok(())
            }
            None => Err(BoardError::PostNotFound),
        }
    }

    async fn save_likes(&self, post: &Post) -> BoardResult<()> {
        match self.posts.write().await.get_mut(&post.post_id) {
            Some(slot) => {
                slot.likes = post.likes.clone();
                Ok(())
            }
            None => Err(BoardError::PostNotFound),
        }
    }

    async fn delete(&self, post_id: &PostId) -> BoardResult<bool> {
        Ok(self.posts.write().await.remove(post_id).is_some())
    }

    async fn count(&self, filter: &PostFilter) -> BoardResult<u64> {
        Ok(self.matching_posts(filter).await.len() as u64)
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        sort_by: SortBy,
        offset: u64,
        limit: u32,
    ) -> BoardResult<Vec<Post>> {
        let mut posts = self.matching_posts(filter).await;
        sort_posts(&mut posts, sort_by);

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(posts.into_iter().skip(skip).take(limit as usize).collect())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for InMemoryBoardRepository {
    async fn create(&self, comment: &Comment) -> BoardResult<()> {
        self.comments
            .write()
            .await
            .insert(comment.comment_id, comment.clone());
        Ok(())
    }

    async fn find_in_post(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
    ) -> BoardResult<Option<Comment>> {
        Ok(self
            .comments
            .read()
            .await
            .get(comment_id)
            .filter(|c| &c.post_id == post_id)
            .cloned())
    }

    async fn find_by_post(&self, post_id: &PostId) -> BoardResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .read()
            .await
            .values()
            .filter(|c| &c.post_id == post_id)
            .cloned()
            .collect();
        sort_thread(&mut comments);
        Ok(comments)
    }

    async fn find_thread_links(&self, post_id: &PostId) -> BoardResult<Vec<ThreadLink>> {
        Ok(self
            .comments
            .read()
            .await
            .values()
            .filter(|c| &c.post_id == post_id)
            .map(|c| ThreadLink {
                comment_id: c.comment_id,
                parent_id: c.parent_id,
            })
            .collect())
    }

    async fn update(&self, comment: &Comment) -> BoardResult<()> {
        let mut comments = self.comments.write().await;
        match comments
            .get_mut(&comment.comment_id)
            .filter(|c| c.post_id == comment.post_id)
        {
            Some(slot) => {
                slot.content = comment.content.clone();
                slot.updated_at = comment.updated_at;
                Ok(())
            }
            None => Err(BoardError::CommentNotFound),
        }
    }

    async fn save_likes(&self, comment: &Comment) -> BoardResult<()> {
        let mut comments = self.comments.write().await;
        match comments
            .get_mut(&comment.comment_id)
            .filter(|c| c.post_id == comment.post_id)
        {
            Some(slot) => {
                slot.likes = comment.likes.clone();
                Ok(())
            }
            None => Err(BoardError::CommentNotFound),
        }
    }

    async fn delete_many(&self, post_id: &PostId, comment_ids: &[CommentId]) -> BoardResult<u64> {
        let mut comments = self.comments.write().await;

        // Same check the parent_id foreign key makes at statement end.
        let dangling = comments.values().any(|c| {
            !comment_ids.contains(&c.comment_id)
                && c.parent_id.as_ref().is_some_and(|p| comment_ids.contains(p))
        });
        if dangling {
            return Err(BoardError::Internal(
                "comment still referenced by a reply outside the deleted set".into(),
            ));
        }

        let mut deleted = 0;
        for id in comment_ids {
            if comments.get(id).is_some_and(|c| &c.post_id == post_id) {
                comments.remove(id);
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
