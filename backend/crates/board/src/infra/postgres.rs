//! PostgreSQL Repository Implementation
//!
//! Like sets are `UUID[]` columns; the popular sort orders on their
//! cardinality. Search goes through `ILIKE ... ESCAPE '\'` with the term's
//! metacharacters escaped, so it stays a literal match.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::services::comment_thread::ThreadLink;
use crate::domain::value_object::{
    author::AuthorSnapshot,
    feed_query::{PostFilter, SortBy},
    like_set::LikeSet,
};
use crate::error::{BoardError, BoardResult};

const POST_COLUMNS: &str = r#"
    post_id,
    category_id,
    title,
    content,
    excerpt,
    author_id,
    author_display_name,
    author_avatar_url,
    tags,
    thumbnail_url,
    liker_ids,
    created_at,
    updated_at
"#;

const COMMENT_COLUMNS: &str = r#"
    comment_id,
    post_id,
    parent_id,
    author_id,
    author_display_name,
    author_avatar_url,
    content,
    liker_ids,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed board repository
#[derive(Clone)]
pub struct PgBoardRepository {
    pool: PgPool,
}

impl PgBoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn like_ids(likes: &LikeSet) -> Vec<Uuid> {
    likes.iter().map(|id| *id.as_uuid()).collect()
}

/// Appends ` WHERE ...` for every active filter
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    let mut has_where = false;
    let mut clause = |builder: &mut QueryBuilder<'_, Postgres>| {
        builder.push(if has_where { " AND " } else { " WHERE " });
        has_where = true;
    };

    if let Some(category_id) = &filter.category_id {
        clause(builder);
        builder.push("category_id = ").push_bind(category_id.clone());
    }

    if let Some(author_id) = &filter.author_id {
        clause(builder);
        builder.push("author_id = ").push_bind(*author_id.as_uuid());
    }

    if let Some(term) = &filter.search {
        let pattern = term.like_pattern();
        clause(builder);
        builder
            .push("(title ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR content ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR excerpt ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'))");
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBoardRepository {
    async fn create(&self, post: &Post) -> BoardResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                category_id,
                title,
                content,
                excerpt,
                author_id,
                author_display_name,
                author_avatar_url,
                tags,
                thumbnail_url,
                liker_ids,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.category_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(post.author.author_id.as_uuid())
        .bind(&post.author.display_name)
        .bind(&post.author.avatar_url)
        .bind(&post.tags)
        .bind(&post.thumbnail_url)
        .bind(like_ids(&post.likes))
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BoardResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update(&self, post: &Post) -> BoardResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                category_id = $2,
                title = $3,
                content = $4,
                excerpt = $5,
                tags = $6,
                thumbnail_url = $7,
                updated_at = $8
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.category_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.tags)
        .bind(&post.thumbnail_url)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(BoardError::PostNotFound);
        }
        Ok(())
    }

    async fn save_likes(&self, post: &Post) -> BoardResult<()> {
        let result = sqlx::query("UPDATE posts SET liker_ids = $2 WHERE post_id = $1")
            .bind(post.post_id.as_uuid())
            .bind(like_ids(&post.likes))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BoardError::PostNotFound);
        }
        Ok(())
    }

    async fn delete(&self, post_id: &PostId) -> BoardResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filter: &PostFilter) -> BoardResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts");
        push_filter(&mut builder, filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        sort_by: SortBy,
        offset: u64,
        limit: u32,
    ) -> BoardResult<Vec<Post>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {POST_COLUMNS} FROM posts"));
        push_filter(&mut builder, filter);

        builder.push(match sort_by {
            SortBy::Latest => " ORDER BY created_at DESC, post_id DESC",
            SortBy::Popular => {
                " ORDER BY cardinality(liker_ids) DESC, created_at DESC, post_id DESC"
            }
        });
        builder
            .push(" LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBoardRepository {
    async fn create(&self, comment: &Comment) -> BoardResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                parent_id,
                author_id,
                author_display_name,
                author_avatar_url,
                content,
                liker_ids,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.parent_id.map(CommentId::into_uuid))
        .bind(comment.author.author_id.as_uuid())
        .bind(&comment.author.display_name)
        .bind(&comment.author.avatar_url)
        .bind(&comment.content)
        .bind(like_ids(&comment.likes))
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_in_post(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
    ) -> BoardResult<Option<Comment>> {
        let sql =
            format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 AND comment_id = $2");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(post_id.as_uuid())
            .bind(comment_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn find_by_post(&self, post_id: &PostId) -> BoardResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY created_at ASC, comment_id ASC"
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(post_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn find_thread_links(&self, post_id: &PostId) -> BoardResult<Vec<ThreadLink>> {
        let rows: Vec<(Uuid, Option<Uuid>)> =
            sqlx::query_as("SELECT comment_id, parent_id FROM comments WHERE post_id = $1")
                .bind(post_id.as_uuid())
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(comment_id, parent_id)| ThreadLink {
                comment_id: CommentId::from_uuid(comment_id),
                parent_id: parent_id.map(CommentId::from_uuid),
            })
            .collect())
    }

    async fn update(&self, comment: &Comment) -> BoardResult<()> {
        let result = sqlx::query(
            "UPDATE comments SET content = $3, updated_at = $4 WHERE post_id = $1 AND comment_id = $2",
        )
        .bind(comment.post_id.as_uuid())
        .bind(comment.comment_id.as_uuid())
        .bind(&comment.content)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(BoardError::CommentNotFound);
        }
        Ok(())
    }

    async fn save_likes(&self, comment: &Comment) -> BoardResult<()> {
        let result = sqlx::query(
            "UPDATE comments SET liker_ids = $3 WHERE post_id = $1 AND comment_id = $2",
        )
        .bind(comment.post_id.as_uuid())
        .bind(comment.comment_id.as_uuid())
        .bind(like_ids(&comment.likes))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(BoardError::CommentNotFound);
        }
        Ok(())
    }

    async fn delete_many(&self, post_id: &PostId, comment_ids: &[CommentId]) -> BoardResult<u64> {
        if comment_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<Uuid> = comment_ids.iter().map(|id| *id.as_uuid()).collect();
        let result = sqlx::query("DELETE FROM comments WHERE post_id = $1 AND comment_id = ANY($2)")
            .bind(post_id.as_uuid())
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    category_id: String,
    title: String,
    content: String,
    excerpt: String,
    author_id: Uuid,
    author_display_name: String,
    author_avatar_url: Option<String>,
    tags: Vec<String>,
    thumbnail_url: Option<String>,
    liker_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            category_id: self.category_id,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            author: AuthorSnapshot {
                author_id: UserId::from_uuid(self.author_id),
                display_name: self.author_display_name,
                avatar_url: self.author_avatar_url,
            },
            tags: self.tags,
            thumbnail_url: self.thumbnail_url,
            likes: LikeSet::from_db(self.liker_ids.into_iter().map(UserId::from_uuid)),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    parent_id: Option<Uuid>,
    author_id: Uuid,
    author_display_name: String,
    author_avatar_url: Option<String>,
    content: String,
    liker_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            post_id: PostId::from_uuid(self.post_id),
            parent_id: self.parent_id.map(CommentId::from_uuid),
            author: AuthorSnapshot {
                author_id: UserId::from_uuid(self.author_id),
                display_name: self.author_display_name,
                avatar_url: self.author_avatar_url,
            },
            content: self.content,
            likes: LikeSet::from_db(self.liker_ids.into_iter().map(UserId::from_uuid)),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
