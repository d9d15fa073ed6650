//! Repository for the `articles` table, including the personalized feed.

use conduit_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, ArticleFilter, CreateArticle, UpdateArticle};

/// Column list shared across queries. Prefixed with the `a` alias because
/// listing queries join through users and the follow graph.
const COLUMNS: &str = "a.id, a.author_id, a.slug, a.title, a.description, a.body, \
                       a.created_at, a.updated_at";

/// Filter predicates shared by [`ArticleRepo::list`] and
/// [`ArticleRepo::count`]. Each `$n::TEXT IS NULL` guard disables its
/// filter when the caller passes `None`.
const FILTER_PREDICATES: &str = "\
    ($1::TEXT IS NULL OR u.username = $1) \
    AND ($2::TEXT IS NULL OR EXISTS ( \
        SELECT 1 FROM article_favorites af \
        JOIN users fav ON fav.id = af.profile_id \
        WHERE af.article_id = a.id AND fav.username = $2)) \
    AND ($3::TEXT IS NULL OR EXISTS ( \
        SELECT 1 FROM article_tags jt \
        JOIN tags t ON t.id = jt.tag_id \
        WHERE jt.article_id = a.id AND t.name = $3))";

/// Global article ordering: newest first, last-touched as tiebreak.
const ORDERING: &str = "a.created_at DESC, a.updated_at DESC";

/// Provides CRUD and listing operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles AS a (author_id, slug, title, description, body)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(input.author_id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find an article by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles a WHERE a.slug = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Update an article. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles AS a SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                body = COALESCE($5, body),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List articles newest first, with optional author/favorited/tag
    /// filters and pagination.
    pub async fn list(
        pool: &PgPool,
        filter: &ArticleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles a
             JOIN users u ON u.id = a.author_id
             WHERE {FILTER_PREDICATES}
             ORDER BY {ORDERING}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&filter.author)
            .bind(&filter.favorited)
            .bind(&filter.tag)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of articles matching `filter`, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &ArticleFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM articles a
             JOIN users u ON u.id = a.author_id
             WHERE {FILTER_PREDICATES}"
        );
        let count: (i64,) = sqlx::query_as(&query)
            .bind(&filter.author)
            .bind(&filter.favorited)
            .bind(&filter.tag)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// The personalized feed: articles authored by any profile the viewer
    /// follows, newest first. A viewer who follows nobody gets an empty
    /// page, not an error.
    pub async fn feed(
        pool: &PgPool,
        viewer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles a
             JOIN profile_follows f ON f.followee_id = a.author_id
             WHERE f.follower_id = $1
             ORDER BY {ORDERING}
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(viewer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of feed articles for the viewer, ignoring pagination.
    pub async fn count_feed(pool: &PgPool, viewer_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM articles a
             JOIN profile_follows f ON f.followee_id = a.author_id
             WHERE f.follower_id = $1",
        )
        .bind(viewer_id)
        .fetch_one(pool)
        .await?;
        Ok(count.0)
    }
}
