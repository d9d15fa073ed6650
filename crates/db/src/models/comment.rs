//! Comment entity model and DTOs.

use conduit_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full comment row from the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub article_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment.
#[derive(Debug)]
pub struct CreateComment {
    pub article_id: DbId,
    pub author_id: DbId,
    pub body: String,
}
