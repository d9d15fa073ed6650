//! Handlers for articles: CRUD, the listing filters, the personalized
//! feed, and favoriting.
//!
//! The feed is derived at query time from the live follow graph -- no
//! caching, so a follow is reflected by the very next feed request.
//! Favorite/unfavorite have the same idempotent edge semantics as
//! follow/unfollow; authors may favorite their own articles.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use conduit_core::error::CoreError;
use conduit_core::naming::article_slug;
use conduit_core::types::DbId;
use conduit_db::models::article::{Article, ArticleFilter, CreateArticle, UpdateArticle};
use conduit_db::repositories::{ArticleRepo, FavoriteRepo, FollowRepo, ProfileRepo, TagRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::{ArticleListParams, PaginationParams};
use crate::response::{ArticleBody, ArticleView, ArticlesBody, ProfileView};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/articles`.
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub article: CreateArticleFields,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, rename = "tagList")]
    pub tag_list: Vec<String>,
}

/// Request body for `PUT /api/articles/{slug}`. Partial.
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub article: UpdateArticleFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticleFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/articles
///
/// Global article listing, newest first, with optional
/// author/favorited/tag filters and pagination.
pub async fn list_articles(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ArticleFilter {
        author: params.author.clone(),
        favorited: params.favorited.clone(),
        tag: params.tag.clone(),
    };

    let articles =
        ArticleRepo::list(&state.pool, &filter, params.limit(), params.offset()).await?;
    let articles_count = ArticleRepo::count(&state.pool, &filter).await?;

    let body = articles_body(&state.pool, articles, articles_count, viewer.user_id()).await?;
    Ok(Json(body))
}

/// GET /api/articles/feed/
///
/// Articles authored by any profile the viewer follows, newest first.
/// A viewer who follows nobody gets an empty page.
pub async fn feed(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let articles =
        ArticleRepo::feed(&state.pool, auth.user.id, params.limit(), params.offset()).await?;
    let articles_count = ArticleRepo::count_feed(&state.pool, auth.user.id).await?;

    let body = articles_body(&state.pool, articles, articles_count, Some(auth.user.id)).await?;
    Ok(Json(body))
}

/// POST /api/articles
///
/// Create an article. The slug is derived from the title with a random
/// suffix so repeated titles do not collide.
pub async fn create_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let fields = input.article;

    if fields.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title is required".into(),
        )));
    }

    let article = ArticleRepo::create(
        &state.pool,
        &CreateArticle {
            author_id: auth.user.id,
            slug: article_slug(&fields.title),
            title: fields.title,
            description: fields.description,
            body: fields.body,
        },
    )
    .await?;

    if !fields.tag_list.is_empty() {
        TagRepo::attach_many(&state.pool, article.id, &fields.tag_list).await?;
    }

    tracing::info!(article_id = article.id, slug = %article.slug, "Article created");

    let view = article_view(&state.pool, &article, Some(auth.user.id)).await?;
    Ok((StatusCode::CREATED, Json(ArticleBody { article: view })))
}

/// GET /api/articles/{slug}
pub async fn get_article(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, &slug).await?;

    let view = article_view(&state.pool, &article, viewer.user_id()).await?;
    Ok(Json(ArticleBody { article: view }))
}

/// PUT /api/articles/{slug}
///
/// Partial update of title/description/body, author only. A title change
/// re-slugs the article.
pub async fn update_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpdateArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, &slug).await?;
    require_author(&article, auth.user.id)?;

    let fields = input.article;
    let new_slug = fields.title.as_deref().map(article_slug);

    let article = ArticleRepo::update(
        &state.pool,
        article.id,
        &UpdateArticle {
            slug: new_slug,
            title: fields.title,
            description: fields.description,
            body: fields.body,
        },
    )
    .await?
    .ok_or_else(|| CoreError::not_found("Article", &slug))?;

    tracing::info!(article_id = article.id, slug = %article.slug, "Article updated");

    let view = article_view(&state.pool, &article, Some(auth.user.id)).await?;
    Ok(Json(ArticleBody { article: view }))
}

/// DELETE /api/articles/{slug}
///
/// Author only.
pub async fn delete_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, &slug).await?;
    require_author(&article, auth.user.id)?;

    ArticleRepo::delete(&state.pool, article.id).await?;

    tracing::info!(article_id = article.id, slug = %slug, "Article deleted");

    Ok(StatusCode::OK)
}

/// POST /api/articles/{slug}/favorite/
///
/// Favorite an article; a repeated favorite leaves exactly one edge.
pub async fn favorite_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, &slug).await?;

    FavoriteRepo::favorite(&state.pool, auth.user.id, article.id).await?;

    tracing::info!(article_id = article.id, user_id = auth.user.id, "Article favorited");

    let view = article_view(&state.pool, &article, Some(auth.user.id)).await?;
    Ok((StatusCode::CREATED, Json(ArticleBody { article: view })))
}

/// DELETE /api/articles/{slug}/favorite/
///
/// Unfavorite an article; an absent edge is a successful no-op.
pub async fn unfavorite_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, &slug).await?;

    FavoriteRepo::unfavorite(&state.pool, auth.user.id, article.id).await?;

    tracing::info!(article_id = article.id, user_id = auth.user.id, "Article unfavorited");

    let view = article_view(&state.pool, &article, Some(auth.user.id)).await?;
    Ok(Json(ArticleBody { article: view }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up an article by slug or fail with 404.
pub(crate) async fn find_article(pool: &PgPool, slug: &str) -> Result<Article, AppError> {
    ArticleRepo::find_by_slug(pool, slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Article", slug).into())
}

/// Reject writes from anyone but the article's author.
fn require_author(article: &Article, user_id: DbId) -> Result<(), AppError> {
    if article.author_id != user_id {
        return Err(AppError::Core(CoreError::Permission(
            "you may only modify your own articles".into(),
        )));
    }
    Ok(())
}

/// Build an [`ArticleView`] for the given viewer: author profile with its
/// `following` flag, tag list, and the viewer-dependent favorite fields.
pub(crate) async fn article_view(
    pool: &PgPool,
    article: &Article,
    viewer: Option<DbId>,
) -> Result<ArticleView, AppError> {
    let author = ProfileRepo::find_by_user_id(pool, article.author_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("article {} has no author profile", article.id))
        })?;

    let following = match viewer {
        Some(viewer_id) => FollowRepo::is_following(pool, viewer_id, article.author_id).await?,
        None => false,
    };
    let favorited = match viewer {
        Some(viewer_id) => FavoriteRepo::is_favorited(pool, viewer_id, article.id).await?,
        None => false,
    };
    let favorites_count = FavoriteRepo::favorites_count(pool, article.id).await?;
    let tag_list = TagRepo::names_for_article(pool, article.id).await?;

    Ok(ArticleView {
        slug: article.slug.clone(),
        title: article.title.clone(),
        description: article.description.clone(),
        body: article.body.clone(),
        tag_list,
        created_at: article.created_at,
        updated_at: article.updated_at,
        favorited,
        favorites_count,
        author: ProfileView::from_record(&author, following),
    })
}

/// Build the listing envelope for a page of articles.
async fn articles_body(
    pool: &PgPool,
    articles: Vec<Article>,
    articles_count: i64,
    viewer: Option<DbId>,
) -> Result<ArticlesBody, AppError> {
    let mut views = Vec::with_capacity(articles.len());
    for article in &articles {
        views.push(article_view(pool, article, viewer).await?);
    }
    Ok(ArticlesBody {
        articles: views,
        articles_count,
    })
}
