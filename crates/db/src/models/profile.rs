//! Profile projection used by the API views.
//!
//! A profile row exists for exactly the lifetime of its user; both are
//! written through `UserRepo`.

use conduit_core::types::DbId;
use sqlx::FromRow;

/// Profile joined with its owning user's username -- the shape the API
/// views want. `image` is the stored value; the presentation layer decides
/// whether to substitute a placeholder.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRecord {
    pub user_id: DbId,
    pub username: String,
    pub bio: String,
    pub image: String,
}
