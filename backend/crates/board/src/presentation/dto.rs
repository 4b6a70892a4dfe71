//! API DTOs (Data Transfer Objects)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::FeedQuery;
use crate::domain::entity::{
    comment::Comment,
    post::{Post, PostDraft, PostPatch},
};
use crate::domain::services::comment_thread::CommentTree;
use crate::domain::value_object::feed_query::FeedPage;

// ============================================================================
// Feed
// ============================================================================

/// `GET /posts` query string. Everything arrives as text and is parsed
/// leniently; `limit` is accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category_id: Option<String>,
    pub sort_by: Option<String>,
    pub author_id: Option<String>,
}

impl From<FeedParams> for FeedQuery {
    fn from(params: FeedParams) -> Self {
        FeedQuery {
            search: params.search,
            page: parse_page(params.page.as_deref()),
            category_id: params.category_id,
            author_id: params.author_id,
            sort_by: params
                .sort_by
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// Leading integer of the value (sign allowed, trailing junk ignored), else 1
fn parse_page(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim) else {
        return 1;
    };
    let unsigned = raw.trim_start_matches(['+', '-']);
    let sign_len = raw.len() - unsigned.len();
    if sign_len > 1 {
        return 1;
    }
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    raw[..sign_len + digits].parse().unwrap_or(1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub items: Vec<PostResponse>,
    pub total: u64,
    pub page: u64,
    pub limit: u32,
    pub total_pages: u64,
}

impl From<FeedPage<Post>> for FeedResponse {
    fn from(page: FeedPage<Post>) -> Self {
        let page = page.map(PostResponse::from);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Missing text fields deserialize as empty and fail validation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
}

impl From<CreatePostRequest> for PostDraft {
    fn from(req: CreatePostRequest) -> Self {
        PostDraft {
            category_id: req.category_id,
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            tags: req.tags,
            thumbnail_url: req.thumbnail_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub category_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub thumbnail_url: Option<String>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        PostPatch {
            category_id: req.category_id,
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            tags: req.tags,
            thumbnail_url: req.thumbnail_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    /// Author display name at creation time
    pub author: String,
    pub author_id: String,
    pub author_avatar_url: Option<String>,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    /// Ids of the users who liked the post
    pub likes: Vec<String>,
    pub likes_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.post_id.to_string(),
            likes: post.likes.iter().map(ToString::to_string).collect(),
            likes_count: post.likes_count(),
            category_id: post.category_id,
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            author: post.author.display_name,
            author_id: post.author.author_id.to_string(),
            author_avatar_url: post.author.avatar_url,
            tags: post.tags,
            thumbnail_url: post.thumbnail_url,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: String,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub author: String,
    pub author_id: String,
    pub author_avatar_url: Option<String>,
    pub likes: Vec<String>,
    pub likes_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.to_string(),
            post_id: comment.post_id.to_string(),
            parent_id: comment.parent_id.map(|p| p.to_string()),
            likes: comment.likes.iter().map(ToString::to_string).collect(),
            likes_count: comment.likes_count(),
            content: comment.content,
            author: comment.author.display_name,
            author_id: comment.author.author_id.to_string(),
            author_avatar_url: comment.author.avatar_url,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Threaded view: top-level comments plus replies keyed by parent id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentTreeResponse {
    pub roots: Vec<CommentResponse>,
    pub children: BTreeMap<String, Vec<CommentResponse>>,
}

impl From<CommentTree> for CommentTreeResponse {
    fn from(tree: CommentTree) -> Self {
        Self {
            roots: tree.roots.into_iter().map(CommentResponse::from).collect(),
            children: tree
                .children
                .into_iter()
                .map(|(parent, replies)| {
                    (
                        parent.to_string(),
                        replies.into_iter().map(CommentResponse::from).collect(),
                    )
                })
                .collect(),
        }
    }
}
