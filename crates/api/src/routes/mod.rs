//! Route tree for the API.
//!
//! Trailing slashes are load-bearing: routes shown with one are
//! registered with one and are not reachable without it.

pub mod articles;
pub mod health;
pub mod profiles;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/                        register (POST)
/// /users/login/                  login (POST)
/// /user                          current user (GET), update (PUT)
///
/// /profiles/{username}           public profile (GET)
/// /profiles/{username}/follow    follow (POST), unfollow (DELETE)
///
/// /articles                      list (GET), create (POST)
/// /articles/feed/                personalized feed (GET, requires auth)
/// /articles/{slug}               get, update, delete
/// /articles/{slug}/favorite/     favorite (POST), unfavorite (DELETE)
/// /articles/{slug}/comments/     list (GET), create (POST)
/// /articles/{slug}/comments/{id} delete (DELETE)
///
/// /tags                          list tag names (GET)
///
/// /health                        liveness and db reachability (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(profiles::router())
        .merge(articles::router())
        .merge(tags::router())
}
