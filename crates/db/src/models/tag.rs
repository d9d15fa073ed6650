//! Tag entity model.

use conduit_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `tags` table. Tags are created on demand the first time
/// an article uses them and never deleted.
#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
