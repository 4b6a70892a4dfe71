//! Find Posts Use Case
//!
//! The paginated feed: filter, count, clamp the page, then fetch it.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::BoardConfig;
use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::feed_query::{FeedPage, Pagination, PostFilter, SearchTerm, SortBy};
use crate::error::BoardResult;

/// Raw feed parameters
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub search: Option<String>,
    pub page: i64,
    pub category_id: Option<String>,
    pub author_id: Option<String>,
    pub sort_by: SortBy,
}

pub struct FindPostsUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
    config: Arc<BoardConfig>,
}

impl<R> FindPostsUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BoardConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, query: FeedQuery) -> BoardResult<FeedPage<Post>> {
        let page_size = self.config.page_size;

        let author_id = match non_blank(query.author_id) {
            None => None,
            Some(raw) => match raw.parse::<UserId>() {
                Ok(id) => Some(id),
                // No user has this id, so nothing can match
                Err(_) => return Ok(FeedPage::new(Vec::new(), Pagination::resolve(1, 0, page_size))),
            },
        };

        let filter = PostFilter {
            search: query.search.as_deref().and_then(SearchTerm::parse),
            category_id: non_blank(query.category_id),
            author_id,
        };

        let total = self.repo.count(&filter).await?;
        let pagination = Pagination::resolve(query.page, total, page_size);

        let items = self
            .repo
            .find_page(&filter, query.sort_by, pagination.offset(), page_size)
            .await?;

        tracing::debug!(
            total,
            page = pagination.page,
            total_pages = pagination.total_pages,
            "Feed query"
        );

        Ok(FeedPage::new(items, pagination))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
