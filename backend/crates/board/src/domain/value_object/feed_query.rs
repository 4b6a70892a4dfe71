//! Feed Query
//!
//! Filter, sort and pagination vocabulary for the post feed.
//!
//! ## Pagination contract
//! - `total_pages = max(1, ceil(total / page_size))`
//! - the served page is the requested page clamped into `[1, total_pages]`
//! - page size is owned by the server

use std::str::FromStr;

use kernel::id::UserId;

use crate::domain::entity::post::Post;

// ============================================================================
// Search
// ============================================================================

/// Case-insensitive literal substring
///
/// The term never acts as a pattern; `a.b*` matches only the text `a.b*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// `None` for blank input
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            folded: raw.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }

    /// `%term%` for `ILIKE ... ESCAPE '\'`, with `\`, `%` and `_` escaped
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.raw.len() + 2);
        pattern.push('%');
        for ch in self.raw.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

// ============================================================================
// Sort
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// `created_at` desc
    #[default]
    Latest,
    /// like count desc, then `created_at` desc
    Popular,
}

impl FromStr for SortBy {
    type Err = std::convert::Infallible;

    /// Anything but `popular` is the latest-first feed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim().eq_ignore_ascii_case("popular") {
            SortBy::Popular
        } else {
            SortBy::Latest
        })
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Conjunction of the optional feed filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub search: Option<SearchTerm>,
    pub category_id: Option<String>,
    pub author_id: Option<UserId>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category_id) = &self.category_id {
            if &post.category_id != category_id {
                return false;
            }
        }

        if let Some(author_id) = &self.author_id {
            if &post.author.author_id != author_id {
                return false;
            }
        }

        if let Some(term) = &self.search {
            let hit = term.matches(&post.title)
                || term.matches(&post.content)
                || term.matches(&post.excerpt)
                || post.tags.iter().any(|tag| term.matches(tag));
            if !hit {
                return false;
            }
        }

        true
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn resolve(requested_page: i64, total: u64, page_size: u32) -> Self {
        let size = u64::from(page_size.max(1));
        let total_pages = total.div_ceil(size).max(1);
        let requested = u64::try_from(requested_page.max(1)).unwrap_or(1);

        Self {
            page: requested.min(total_pages),
            page_size: page_size.max(1),
            total,
            total_pages,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * u64::from(self.page_size)
    }
}

/// One page of feed results
#[derive(Debug, Clone)]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T> FeedPage<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self {
            items,
            total: pagination.total,
            page: pagination.page,
            limit: pagination.page_size,
            total_pages: pagination.total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> FeedPage<U> {
        FeedPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
