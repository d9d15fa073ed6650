//! Repository for the `profile_follows` edge table.
//!
//! Follows are a directed relation with no identity of their own: an edge
//! either exists or it does not. Both mutations are idempotent -- the
//! composite primary key absorbs duplicate inserts and a missing edge makes
//! delete a no-op.

use conduit_core::types::DbId;
use sqlx::PgPool;

/// Provides edge operations on the follow graph.
pub struct FollowRepo;

impl FollowRepo {
    /// Insert the edge `follower -> followee` if absent.
    ///
    /// Returns `true` if a new edge was created, `false` if it already
    /// existed. Callers enforce the no-self-follow rule; the store does not.
    pub async fn follow(
        pool: &PgPool,
        follower_id: DbId,
        followee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO profile_follows (follower_id, followee_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove the edge `follower -> followee` if present.
    ///
    /// Returns `true` if an edge was removed; an absent edge is a
    /// successful no-op returning `false`.
    pub async fn unfollow(
        pool: &PgPool,
        follower_id: DbId,
        followee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM profile_follows WHERE follower_id = $1 AND followee_id = $2",
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the edge `follower -> followee` exists.
    pub async fn is_following(
        pool: &PgPool,
        follower_id: DbId,
        followee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM profile_follows
                WHERE follower_id = $1 AND followee_id = $2
             )",
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(pool)
        .await
    }
}
