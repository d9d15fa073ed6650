//! Route definitions for profiles and the follow graph.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// GET    /profiles/{username}         -> get_profile
/// POST   /profiles/{username}/follow  -> follow_profile (requires auth)
/// DELETE /profiles/{username}/follow  -> unfollow_profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles/{username}", get(profiles::get_profile))
        .route(
            "/profiles/{username}/follow",
            post(profiles::follow_profile).delete(profiles::unfollow_profile),
        )
}
