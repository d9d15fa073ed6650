//! Route definition for the tag listing.

use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// GET /tags -> list_tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/tags", get(tags::list_tags))
}
