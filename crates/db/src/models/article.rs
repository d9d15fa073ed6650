//! Article entity model and DTOs.

use conduit_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full article row from the `articles` table.
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: DbId,
    pub author_id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an article. The slug is generated by the caller so the
/// store never invents identifiers.
#[derive(Debug)]
pub struct CreateArticle {
    pub author_id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
}

/// DTO for updating an article. All fields are optional; `slug` accompanies
/// a title change.
#[derive(Debug, Default)]
pub struct UpdateArticle {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

/// Optional filters for article listing. All usernames and tag names are
/// matched exactly.
#[derive(Debug, Default)]
pub struct ArticleFilter {
    /// Only articles written by this username.
    pub author: Option<String>,
    /// Only articles favorited by this username.
    pub favorited: Option<String>,
    /// Only articles carrying this tag.
    pub tag: Option<String>,
}
