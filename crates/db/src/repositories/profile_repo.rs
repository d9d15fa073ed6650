//! Repository for the `profiles` table.

use conduit_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::ProfileRecord;

/// Column list for the username-joined projection.
const RECORD_COLUMNS: &str = "p.user_id, u.username, p.bio, p.image";

/// Provides lookups for profiles. Profile writes go through `UserRepo`,
/// which owns the user/profile pair.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by its owner's username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE u.username = $1"
        );
        sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by its owner's user id.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE p.user_id = $1"
        );
        sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
