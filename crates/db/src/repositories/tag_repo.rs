//! Repository for the `tags` and `article_tags` tables.

use conduit_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::Tag;

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, created_at";

/// Provides tag creation and article-tag associations.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag or return the existing one with that name.
    ///
    /// The `DO UPDATE` on conflict is a no-op write that makes `RETURNING`
    /// yield the existing row instead of nothing.
    pub async fn create_or_get(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Associate an article with every tag name in `names`, creating tags
    /// on demand. Runs in one transaction so a half-tagged article never
    /// becomes visible.
    pub async fn attach_many(
        pool: &PgPool,
        article_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let upsert = format!(
            "INSERT INTO tags (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        for name in names {
            let tag = sqlx::query_as::<_, Tag>(&upsert)
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;
            sqlx::query(
                "INSERT INTO article_tags (article_id, tag_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(article_id)
            .bind(tag.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Tag names for one article, alphabetical.
    pub async fn names_for_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT t.name FROM tags t
             JOIN article_tags jt ON jt.tag_id = t.id
             WHERE jt.article_id = $1
             ORDER BY t.name",
        )
        .bind(article_id)
        .fetch_all(pool)
        .await
    }

    /// All tag names in the system, alphabetical.
    pub async fn list_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM tags ORDER BY name")
            .fetch_all(pool)
            .await
    }
}
