//! Route definitions for registration, login, and the current user.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// POST /users/        -> register
/// POST /users/login/  -> login
/// GET  /user          -> current_user (requires auth)
/// PUT  /user          -> update_user (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/", post(users::register))
        .route("/users/login/", post(users::login))
        .route("/user", get(users::current_user).put(users::update_user))
}
