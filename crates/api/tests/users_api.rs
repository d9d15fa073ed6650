//! HTTP-level integration tests for registration, login, and the
//! current-user resource, including token failure modes.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, put_json_auth, register_user};
use conduit_api::auth::token::TokenCodec;
use conduit_db::repositories::UserRepo;
use sqlx::PgPool;

/// The first error message in the wire envelope.
fn error_message(json: &serde_json::Value) -> &str {
    json["errors"]["error"][0].as_str().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// End-to-end: register, login with the same credentials, fetch own user.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_login_get_user_flow(pool: PgPool) {
    // Register.
    let body = serde_json::json!({
        "user": { "username": "stelo", "email": "a@b.com", "password": "test1234" }
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/users/", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], "stelo");
    assert_eq!(json["user"]["email"], "a@b.com");
    let register_token = json["user"]["token"].as_str().unwrap();
    assert!(!register_token.is_empty(), "registration must issue a token");
    assert!(
        json["user"].get("password").is_none() && json["user"].get("password_hash").is_none(),
        "user envelope must never carry password material"
    );

    // Login.
    let body = serde_json::json!({
        "user": { "email": "a@b.com", "password": "test1234" }
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/users/login/", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let login_token = json["user"]["token"].as_str().unwrap().to_string();
    assert!(!login_token.is_empty());

    // Fetch own user with the login token.
    let response = get_auth(common::build_test_app(pool), "/api/user", &login_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], "stelo");
    assert_eq!(json["user"]["email"], "a@b.com");
}

/// Registering twice with the same email fails the second time.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    register_user(&pool, "first").await;

    let body = serde_json::json!({
        "user": { "username": "second", "email": "first@test.com", "password": "test1234" }
    });
    let response = post_json(common::build_test_app(pool), "/api/users/", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "email is already taken");
}

/// Registering with a taken username fails.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    register_user(&pool, "taken").await;

    let body = serde_json::json!({
        "user": { "username": "taken", "email": "other@test.com", "password": "test1234" }
    });
    let response = post_json(common::build_test_app(pool), "/api/users/", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "username is already taken");
}

/// Missing registration fields get their "is required" messages.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_missing_fields(pool: PgPool) {
    let cases = [
        (serde_json::json!({ "user": { "email": "a@b.com", "password": "test1234" } }), "username is required"),
        (serde_json::json!({ "user": { "username": "u", "password": "test1234" } }), "email is required"),
        (serde_json::json!({ "user": { "username": "u", "email": "a@b.com" } }), "password is required"),
    ];

    for (body, expected) in cases {
        let response = post_json(common::build_test_app(pool.clone()), "/api/users/", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(error_message(&json), expected);
    }
}

/// A password below the minimum length is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_short_password(pool: PgPool) {
    let body = serde_json::json!({
        "user": { "username": "shorty", "email": "s@test.com", "password": "seven77" }
    });
    let response = post_json(common::build_test_app(pool), "/api/users/", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Wrong password and unknown email produce the identical message.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    register_user(&pool, "victim").await;

    let wrong_password = serde_json::json!({
        "user": { "email": "victim@test.com", "password": "not-the-password" }
    });
    let unknown_email = serde_json::json!({
        "user": { "email": "ghost@test.com", "password": "test1234" }
    });

    let mut messages = Vec::new();
    for body in [wrong_password, unknown_email] {
        let response =
            post_json(common::build_test_app(pool.clone()), "/api/users/login/", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        messages.push(error_message(&json).to_string());
    }

    assert_eq!(messages[0], "no user found with matching email/password");
    assert_eq!(messages[0], messages[1], "failure modes must be identical");
}

/// Omitted login fields get their "is required" messages.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_missing_fields(pool: PgPool) {
    let body = serde_json::json!({ "user": { "password": "test1234" } });
    let response = post_json(common::build_test_app(pool.clone()), "/api/users/login/", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "email is required");

    let body = serde_json::json!({ "user": { "email": "a@b.com" } });
    let response = post_json(common::build_test_app(pool), "/api/users/login/", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "password is required");
}

/// A deactivated user fails login with the generic credentials message and
/// fails token authentication with the distinct deactivated message.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_user(pool: PgPool) {
    let token = register_user(&pool, "dormant").await;

    let user = UserRepo::find_by_username(&pool, "dormant")
        .await
        .unwrap()
        .unwrap();
    UserRepo::deactivate(&pool, user.id).await.unwrap();

    // Login: generic rejection, correct password notwithstanding.
    let body = serde_json::json!({
        "user": { "email": "dormant@test.com", "password": "test1234" }
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/users/login/", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "no user found with matching email/password");

    // Token auth: distinct deactivated message, 403.
    let response = get_auth(common::build_test_app(pool), "/api/user", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "user has been deactivated");
}

// ---------------------------------------------------------------------------
// Token handling at the boundary
// ---------------------------------------------------------------------------

/// No credential on a protected route rejects with 403.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/user").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An expired token is rejected exactly like an undecodable one.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_token_rejected(pool: PgPool) {
    register_user(&pool, "expired").await;
    let user = UserRepo::find_by_username(&pool, "expired")
        .await
        .unwrap()
        .unwrap();

    // Same secret the test app uses, but an expiry in the past.
    let codec = TokenCodec::new(common::test_config().jwt);
    let stale = codec
        .encode(user.id, chrono::Utc::now().timestamp() - 60)
        .unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/user", &stale).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "could not decode token");
}

/// A token signed with a different secret is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_secret_token_rejected(pool: PgPool) {
    register_user(&pool, "forged").await;
    let user = UserRepo::find_by_username(&pool, "forged")
        .await
        .unwrap()
        .unwrap();

    let mut config = common::test_config().jwt;
    config.secret = "some-other-secret".to_string();
    let forged = TokenCodec::new(config).issue(user.id).unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/user", &forged).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "could not decode token");
}

/// A decodable token whose user row is gone gets its own message.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_for_missing_user_rejected(pool: PgPool) {
    let codec = TokenCodec::new(common::test_config().jwt);
    let orphan = codec.issue(999_999).unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/user", &orphan).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "no user found matching this token");
}

/// The Bearer scheme keyword is accepted case-insensitively.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bearer_scheme_accepted(pool: PgPool) {
    let token = register_user(&pool, "bearer").await;

    let request = axum::http::Request::builder()
        .method(axum::http::Method::GET)
        .uri("/api/user")
        .header("authorization", format!("BEARER {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(common::build_test_app(pool), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// A malformed Authorization header is treated as no credential at all.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_header_treated_as_anonymous(pool: PgPool) {
    let token = register_user(&pool, "proxyvictim").await;

    // Three whitespace-separated parts: absent credential, so the
    // protected route rejects for lack of one rather than a decode error.
    let request = axum::http::Request::builder()
        .method(axum::http::Method::GET)
        .uri("/api/user")
        .header("authorization", format!("Token {token} trailing-junk"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(common::build_test_app(pool), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "authentication required");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Partial update applies only the supplied fields and returns a fresh
/// token.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_user_partial(pool: PgPool) {
    let token = register_user(&pool, "editor").await;

    let body = serde_json::json!({ "user": { "bio": "I edit things" } });
    let response =
        put_json_auth(common::build_test_app(pool.clone()), "/api/user", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["bio"], "I edit things");
    assert_eq!(json["user"]["username"], "editor", "untouched field must survive");
    assert!(json["user"]["token"].is_string(), "response must carry a fresh token");
}

/// A password change re-hashes: the new password logs in, the old fails.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_user_password(pool: PgPool) {
    let token = register_user(&pool, "rotator").await;

    let body = serde_json::json!({ "user": { "password": "brand-new-pass" } });
    let response =
        put_json_auth(common::build_test_app(pool.clone()), "/api/user", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let old = serde_json::json!({
        "user": { "email": "rotator@test.com", "password": "test1234" }
    });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/users/login/", old).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let new = serde_json::json!({
        "user": { "email": "rotator@test.com", "password": "brand-new-pass" }
    });
    let response = post_json(common::build_test_app(pool), "/api/users/login/", new).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Updating email to one another user holds is a validation failure.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_user_duplicate_email(pool: PgPool) {
    register_user(&pool, "holder").await;
    let token = register_user(&pool, "grabber").await;

    let body = serde_json::json!({ "user": { "email": "holder@test.com" } });
    let response = put_json_auth(common::build_test_app(pool), "/api/user", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "email is already taken");
}

/// A rejected update commits nothing: when a password change rides along
/// with an email that collides, the old password must still log in.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_update_leaves_password_unchanged(pool: PgPool) {
    register_user(&pool, "holder").await;
    let token = register_user(&pool, "grabber").await;

    let body = serde_json::json!({
        "user": { "password": "brand-new-pass", "email": "holder@test.com" }
    });
    let response =
        put_json_auth(common::build_test_app(pool.clone()), "/api/user", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(error_message(&json), "email is already taken");

    let old = serde_json::json!({
        "user": { "email": "grabber@test.com", "password": "test1234" }
    });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/users/login/", old).await;
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "old password must still work after a failed update"
    );

    let new = serde_json::json!({
        "user": { "email": "grabber@test.com", "password": "brand-new-pass" }
    });
    let response = post_json(common::build_test_app(pool), "/api/users/login/", new).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
