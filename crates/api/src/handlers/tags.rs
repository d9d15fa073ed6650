//! Handler for the tag listing.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use conduit_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::response::TagsBody;
use crate::state::AppState;

/// GET /api/tags
///
/// Every tag name in the system, alphabetical, unpaginated.
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list_names(&state.pool).await?;

    Ok(Json(TagsBody { tags }))
}
