//! Repository for the `article_favorites` edge table.
//!
//! Same idempotent-edge semantics as `FollowRepo`: the composite primary
//! key absorbs duplicate favorites, removal of an absent edge is a no-op.
//! Unlike follows there is no self-restriction -- authors may favorite
//! their own articles.

use conduit_core::types::DbId;
use sqlx::PgPool;

/// Provides edge operations on the favorite relation.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert the edge `profile -> article` if absent.
    ///
    /// Returns `true` if a new edge was created.
    pub async fn favorite(
        pool: &PgPool,
        profile_id: DbId,
        article_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO article_favorites (profile_id, article_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(profile_id)
        .bind(article_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove the edge `profile -> article` if present.
    ///
    /// Returns `true` if an edge was removed.
    pub async fn unfavorite(
        pool: &PgPool,
        profile_id: DbId,
        article_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM article_favorites WHERE profile_id = $1 AND article_id = $2",
        )
        .bind(profile_id)
        .bind(article_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the edge `profile -> article` exists.
    pub async fn is_favorited(
        pool: &PgPool,
        profile_id: DbId,
        article_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM article_favorites
                WHERE profile_id = $1 AND article_id = $2
             )",
        )
        .bind(profile_id)
        .bind(article_id)
        .fetch_one(pool)
        .await
    }

    /// Number of profiles that have favorited the article.
    pub async fn favorites_count(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM article_favorites WHERE article_id = $1")
                .bind(article_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
