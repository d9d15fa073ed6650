//! Route definitions for articles, the feed, favorites, and comments.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{articles, comments};
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// GET    /articles                      -> list_articles
/// POST   /articles                      -> create_article (requires auth)
/// GET    /articles/feed/                -> feed (requires auth)
/// GET    /articles/{slug}               -> get_article
/// PUT    /articles/{slug}               -> update_article (author only)
/// DELETE /articles/{slug}               -> delete_article (author only)
/// POST   /articles/{slug}/favorite/     -> favorite_article (requires auth)
/// DELETE /articles/{slug}/favorite/     -> unfavorite_article (requires auth)
/// GET    /articles/{slug}/comments/     -> list_comments
/// POST   /articles/{slug}/comments/     -> create_comment (requires auth)
/// DELETE /articles/{slug}/comments/{id} -> delete_comment (comment author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/articles/feed/", get(articles::feed))
        .route(
            "/articles/{slug}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/articles/{slug}/favorite/",
            post(articles::favorite_article).delete(articles::unfavorite_article),
        )
        .route(
            "/articles/{slug}/comments/",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/articles/{slug}/comments/{id}",
            delete(comments::delete_comment),
        )
}
