//! Handlers for registration, login, and the current-user resource.
//!
//! Registration inserts the user and its empty profile in one transaction
//! (see `UserRepo::create`). Login failures use one message for unknown
//! email, wrong password, and deactivated account alike, so responses do
//! not reveal which part was wrong. Every successful response carries a
//! freshly issued token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use conduit_core::error::CoreError;
use conduit_core::messages;
use conduit_db::models::user::{CreateUser, UpdateAccount, User};
use conduit_db::repositories::{ProfileRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, FALLBACK_PHC,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{UserBody, UserView};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/users/`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user: RegisterFields,
}

/// All fields optional so a missing field yields its "is required"
/// message instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct RegisterFields {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /api/users/login/`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user: LoginFields,
}

#[derive(Debug, Deserialize)]
pub struct LoginFields {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `PUT /api/user`. Partial: only supplied fields change.
///
/// The updatable set is this explicit allow-list -- username, email,
/// password, bio, image -- nothing else.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub user: UpdateUserFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserFields {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users/
///
/// Register a new user. Creates the user and its empty profile in one
/// transaction and returns the user envelope with a token.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. All three fields are required and non-empty.
    let username = require(input.user.username, messages::USERNAME_IS_REQUIRED)?;
    let email = require(input.user.email, messages::EMAIL_IS_REQUIRED)?;
    let password = require(input.user.password, messages::PASSWORD_IS_REQUIRED)?;

    // 2. Password length bounds.
    validate_password_strength(&password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 3. Hash and insert. A duplicate username/email surfaces as a unique
    //    violation and is classified into a 400 by the error layer.
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let body = user_body(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /api/users/login/
///
/// Authenticate with email + password. One failure message covers unknown
/// email, wrong password, and deactivated account.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Both fields are required.
    let email = require(input.user.email, messages::EMAIL_IS_REQUIRED)?;
    let password = require(input.user.password, messages::PASSWORD_IS_REQUIRED)?;

    // 2. Look up by email; missing, inactive, and mismatched all fall
    //    through to the same rejection.
    let user = UserRepo::find_by_email(&state.pool, &email).await?;

    // 3. Verify the password hash. The miss path verifies against a
    //    fallback hash so unknown and known emails cost the same argon2
    //    run and cannot be told apart by response timing.
    let stored_hash = match &user {
        Some(user) if user.is_active => user.password_hash.as_str(),
        _ => FALLBACK_PHC,
    };
    let password_valid = verify_password(&password, stored_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    let user = match user {
        Some(user) if user.is_active && password_valid => user,
        _ => return Err(bad_credentials()),
    };

    tracing::info!(user_id = user.id, "User logged in");

    let body = user_body(&state, &user).await?;
    Ok(Json(body))
}

/// GET /api/user
///
/// The authenticated user's own representation, with a fresh token.
pub async fn current_user(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let body = user_body(&state, &auth.user).await?;
    Ok(Json(body))
}

/// PUT /api/user
///
/// Partial update of the allow-listed fields. A supplied password is
/// validated and re-hashed; all writes are applied in one transaction, so
/// a rejected update (duplicate email, say) changes nothing.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let fields = input.user;

    // 1. Supplied identity fields may not be blanked out.
    if matches!(&fields.username, Some(u) if u.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            messages::USERNAME_IS_REQUIRED.into(),
        )));
    }
    if matches!(&fields.email, Some(e) if e.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            messages::EMAIL_IS_REQUIRED.into(),
        )));
    }

    // 2. Password, if supplied, is validated and re-hashed.
    let password_hash = match &fields.password {
        Some(password) => {
            validate_password_strength(password)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    // 3. Apply everything in one transaction. A unique violation on the
    //    new email or username rolls the password change back with it.
    let user = UserRepo::update_account(
        &state.pool,
        auth.user.id,
        &UpdateAccount {
            username: fields.username,
            email: fields.email,
            password_hash,
            bio: fields.bio,
            image: fields.image,
        },
    )
    .await?
    .ok_or_else(|| CoreError::not_found_id("User", auth.user.id))?;

    tracing::info!(user_id = user.id, "User updated");

    let body = user_body(&state, &user).await?;
    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap a required field or fail validation with its message. An empty
/// or whitespace-only value counts as missing.
fn require(value: Option<String>, message: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Core(CoreError::Validation(message.into()))),
    }
}

/// The canonical login rejection. Reported as a validation failure (400),
/// matching the wire contract for the login route.
fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Validation(
        messages::NO_USER_FOUND_WITH_EMAIL_PASSWORD.into(),
    ))
}

/// Build the `{ "user": ... }` envelope with a freshly issued token.
pub(crate) async fn user_body(state: &AppState, user: &User) -> AppResult<UserBody> {
    let profile = ProfileRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("user {} has no profile row", user.id))
        })?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| AppError::InternalError(format!("Token issuing error: {e}")))?;

    Ok(UserBody {
        user: UserView::new(user, profile.bio, profile.image, token),
    })
}
