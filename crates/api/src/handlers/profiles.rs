//! Handlers for public profiles and the follow graph.
//!
//! Follow and unfollow are idempotent: a repeated follow changes nothing
//! and unfollowing a profile that was never followed is a successful
//! no-op. The one hard rule is that a profile cannot follow itself.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use conduit_core::error::CoreError;
use conduit_core::messages;
use conduit_db::repositories::{FollowRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{ProfileBody, ProfileView};
use crate::state::AppState;

/// GET /api/profiles/{username}
///
/// Public profile view. `following` reflects the viewer and is `false`
/// for anonymous requests.
pub async fn get_profile(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let record = ProfileRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| CoreError::not_found("Profile", &username))?;

    let following = match viewer.user_id() {
        Some(viewer_id) => FollowRepo::is_following(&state.pool, viewer_id, record.user_id).await?,
        None => false,
    };

    Ok(Json(ProfileBody {
        profile: ProfileView::from_record(&record, following),
    }))
}

/// POST /api/profiles/{username}/follow
///
/// Follow a profile. Following yourself is a validation error; following
/// someone you already follow leaves exactly one edge.
pub async fn follow_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let record = ProfileRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| CoreError::not_found("Profile", &username))?;

    if record.user_id == auth.user.id {
        return Err(AppError::Core(CoreError::Validation(
            messages::CANNOT_FOLLOW_YOURSELF.into(),
        )));
    }

    FollowRepo::follow(&state.pool, auth.user.id, record.user_id).await?;

    tracing::info!(
        follower_id = auth.user.id,
        followee = %username,
        "Profile followed"
    );

    Ok((
        StatusCode::CREATED,
        Json(ProfileBody {
            profile: ProfileView::from_record(&record, true),
        }),
    ))
}

/// DELETE /api/profiles/{username}/follow
///
/// Unfollow a profile. An absent edge is a successful no-op.
pub async fn unfollow_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let record = ProfileRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| CoreError::not_found("Profile", &username))?;

    FollowRepo::unfollow(&state.pool, auth.user.id, record.user_id).await?;

    tracing::info!(
        follower_id = auth.user.id,
        followee = %username,
        "Profile unfollowed"
    );

    Ok(Json(ProfileBody {
        profile: ProfileView::from_record(&record, false),
    }))
}
