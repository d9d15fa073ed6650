//! Bearer-token authentication extractors for Axum handlers.
//!
//! The `Authorization` header is parsed leniently: it must consist of
//! exactly two whitespace-separated parts (scheme + token) or is treated
//! as absent rather than rejected, so malformed headers injected by
//! proxies do not break anonymous reads. The scheme keyword is matched
//! case-insensitively and both `Token` and `Bearer` are accepted.
//!
//! A supplied token is resolved in three steps, each with its own
//! canonical failure message: decode (expiry counts as a decode failure),
//! user lookup, and active check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use conduit_core::error::CoreError;
use conduit_core::messages;
use conduit_db::models::user::User;
use conduit_db::repositories::UserRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// identity:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The resolved, active user row.
    pub user: User,
}

/// Optional authentication: `None` when no credential was supplied.
///
/// A supplied-but-invalid credential still rejects; leniency applies only
/// to the absence and shape of the header, never to a bad token.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<User>);

impl MaybeAuthUser {
    /// The viewer's user id, if authenticated.
    pub fn user_id(&self) -> Option<conduit_core::types::DbId> {
        self.0.as_ref().map(|u| u.id)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::AuthenticationFailed(
                messages::AUTHENTICATION_REQUIRED.into(),
            ))
        })?;

        let user = resolve_token(state, &token).await?;
        Ok(AuthUser { user })
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            None => Ok(MaybeAuthUser(None)),
            Some(token) => {
                let user = resolve_token(state, &token).await?;
                Ok(MaybeAuthUser(Some(user)))
            }
        }
    }
}

/// Extract the token from the `Authorization` header, if one is usable.
///
/// Returns `None` for a missing header, a non-UTF-8 header, a header that
/// does not split into exactly two parts, or an unknown scheme keyword.
fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get("authorization")?.to_str().ok()?;

    let mut words = header.split_ascii_whitespace();
    let (scheme, token) = (words.next()?, words.next()?);
    if words.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") {
        Some(token.to_string())
    } else {
        None
    }
}

/// Decode the token and resolve it to an active user.
async fn resolve_token(state: &AppState, token: &str) -> Result<User, AppError> {
    let claims = state.tokens.decode(token).map_err(|_| {
        AppError::Core(CoreError::AuthenticationFailed(
            messages::COULD_NOT_DECODE_TOKEN.into(),
        ))
    })?;

    // An expired token is indistinguishable from a forged one at this
    // boundary.
    if claims.is_expired() {
        return Err(AppError::Core(CoreError::AuthenticationFailed(
            messages::COULD_NOT_DECODE_TOKEN.into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, claims.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::AuthenticationFailed(
                messages::NO_USER_FOUND_MATCHING_TOKEN.into(),
            ))
        })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::AuthenticationFailed(
            messages::USER_HAS_BEEN_DEACTIVATED.into(),
        )));
    }

    Ok(user)
}
