//! Stateless bearer-token encoding and decoding.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload of the user's
//! database id and an expiry timestamp. Nothing is stored server-side; a
//! token is valid as long as its signature checks out, its expiry has not
//! passed, and the referenced user still exists and is active. The latter
//! two checks belong to the caller -- [`TokenCodec::decode`] verifies only
//! signature and shape, so an expired token decodes successfully and the
//! request authenticator treats it like a forged one.

use conduit_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in every token.
///
/// The subject claim key is literally `id`; clients and tests depend on
/// that shape.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's internal database id.
    pub id: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Whether the expiry timestamp lies in the past.
    pub fn is_expired(&self) -> bool {
        self.exp <= chrono::Utc::now().timestamp()
    }
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in days (default: 60).
    pub ttl_days: i64,
}

/// Default token lifetime in days.
const DEFAULT_TTL_DAYS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `JWT_SECRET`   | **yes**  | --      |
    /// | `JWT_TTL_DAYS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let ttl_days: i64 = std::env::var("JWT_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_TTL_DAYS.to_string())
            .parse()
            .expect("JWT_TTL_DAYS must be a valid i64");

        Self { secret, ttl_days }
    }
}

/// Encodes and decodes signed bearer tokens.
///
/// Owns its [`JwtConfig`] explicitly so tests can construct codecs with
/// distinct secrets; there is no process-wide key.
#[derive(Clone)]
pub struct TokenCodec {
    config: JwtConfig,
}

impl TokenCodec {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Sign a token for `user_id` expiring at the given Unix timestamp.
    pub fn encode(
        &self,
        user_id: DbId,
        expires_at: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            id: user_id,
            exp: expires_at,
        };

        encode(
            &Header::default(), // HS256
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
    }

    /// Verify a token's signature and shape, returning the embedded
    /// [`Claims`].
    ///
    /// Expiry is deliberately NOT validated here: the caller compares
    /// `claims.exp` against now and must reject an expired token exactly
    /// like an undecodable one.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default(); // HS256
        validation.validate_exp = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }

    /// Sign a fresh token for `user_id` expiring `ttl_days` from now.
    pub fn issue(&self, user_id: DbId) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = chrono::Utc::now().timestamp() + self.config.ttl_days * 24 * 60 * 60;
        self.encode(user_id, exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test codec with a known secret.
    fn test_codec(secret: &str) -> TokenCodec {
        TokenCodec::new(JwtConfig {
            secret: secret.to_string(),
            ttl_days: 60,
        })
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let codec = test_codec("test-secret-that-is-long-enough-for-hmac");
        let exp = chrono::Utc::now().timestamp() + 3600;

        let token = codec.encode(42, exp).expect("encoding should succeed");
        let claims = codec.decode(&token).expect("decoding should succeed");

        assert_eq!(claims.id, 42);
        assert_eq!(claims.exp, exp);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_issue_sets_future_expiry() {
        let codec = test_codec("test-secret-that-is-long-enough-for-hmac");

        let token = codec.issue(7).expect("issuing should succeed");
        let claims = codec.decode(&token).expect("decoding should succeed");

        assert_eq!(claims.id, 7);
        // 60-day lifetime, allow generous slack around "now".
        let expected = chrono::Utc::now().timestamp() + 60 * 24 * 60 * 60;
        assert!((claims.exp - expected).abs() < 60);
    }

    #[test]
    fn test_expired_token_still_decodes() {
        // Expiry is the caller's concern: decode must succeed so the
        // authenticator can treat expiry and forgery identically on its
        // own terms.
        let codec = test_codec("test-secret-that-is-long-enough-for-hmac");
        let exp = chrono::Utc::now().timestamp() - 3600;

        let token = codec.encode(1, exp).expect("encoding should succeed");
        let claims = codec.decode(&token).expect("decoding should succeed");

        assert!(claims.is_expired(), "hour-old expiry must read as expired");
    }

    #[test]
    fn test_different_secrets_fail() {
        let codec_a = test_codec("secret-alpha");
        let codec_b = test_codec("secret-bravo");

        let token = codec_a.issue(1).expect("issuing should succeed");

        let result = codec_b.decode(&token);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_garbage_token_fails() {
        let codec = test_codec("secret");
        assert!(codec.decode("not-a-jwt").is_err());
        assert!(codec.decode("").is_err());
    }
}
