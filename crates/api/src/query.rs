//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for article listings.
const DEFAULT_LIMIT: i64 = 20;
/// Upper bound on a requested page size.
const MAX_LIMIT: i64 = 100;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// One contract for every paginated listing: `limit` defaults to 20 and is
/// clamped to 1..=100, `offset` defaults to 0 and is clamped to be
/// non-negative.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Query parameters for `GET /api/articles`
/// (`?author=&favorited=&tag=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct ArticleListParams {
    /// Only articles written by this username.
    pub author: Option<String>,
    /// Only articles favorited by this username.
    pub favorited: Option<String>,
    /// Only articles carrying this tag.
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ArticleListParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
