//! Handlers for article comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use conduit_core::error::CoreError;
use conduit_core::types::DbId;
use conduit_db::models::comment::{Comment, CreateComment};
use conduit_db::repositories::{CommentRepo, FollowRepo, ProfileRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::articles::find_article;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{CommentBody, CommentView, CommentsBody, ProfileView};
use crate::state::AppState;

/// Request body for `POST /api/articles/{slug}/comments/`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub comment: CreateCommentFields,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentFields {
    pub body: String,
}

/// GET /api/articles/{slug}/comments/
///
/// An article's comments, newest first. Anonymous reads are allowed.
pub async fn list_comments(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, &slug).await?;

    let comments = CommentRepo::list_for_article(&state.pool, article.id).await?;

    let mut views = Vec::with_capacity(comments.len());
    for comment in &comments {
        views.push(comment_view(&state.pool, comment, viewer.user_id()).await?);
    }

    Ok(Json(CommentsBody { comments: views }))
}

/// POST /api/articles/{slug}/comments/
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, &slug).await?;

    if input.comment.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "body is required".into(),
        )));
    }

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            article_id: article.id,
            author_id: auth.user.id,
            body: input.comment.body,
        },
    )
    .await?;

    tracing::info!(comment_id = comment.id, article_id = article.id, "Comment created");

    let view = comment_view(&state.pool, &comment, Some(auth.user.id)).await?;
    Ok((StatusCode::CREATED, Json(CommentBody { comment: view })))
}

/// DELETE /api/articles/{slug}/comments/{id}
///
/// Comment author only.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, &slug).await?;

    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.article_id == article.id)
        .ok_or_else(|| CoreError::not_found_id("Comment", id))?;

    if comment.author_id != auth.user.id {
        return Err(AppError::Core(CoreError::Permission(
            "you may only delete your own comments".into(),
        )));
    }

    CommentRepo::delete(&state.pool, comment.id).await?;

    tracing::info!(comment_id = comment.id, article_id = article.id, "Comment deleted");

    Ok(StatusCode::OK)
}

/// Build a [`CommentView`] with the author profile as seen by the viewer.
async fn comment_view(
    pool: &PgPool,
    comment: &Comment,
    viewer: Option<DbId>,
) -> Result<CommentView, AppError> {
    let author = ProfileRepo::find_by_user_id(pool, comment.author_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("comment {} has no author profile", comment.id))
        })?;

    let following = match viewer {
        Some(viewer_id) => FollowRepo::is_following(pool, viewer_id, comment.author_id).await?,
        None => false,
    };

    Ok(CommentView {
        id: comment.id,
        body: comment.body.clone(),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
        author: ProfileView::from_record(&author, following),
    })
}
