//! Canonical user-facing message strings.
//!
//! These exact strings are part of the API contract: clients match on them,
//! and the test suite asserts them. Change them only as a breaking change.

// ---------------------------------------------------------------------------
// Token / request authentication
// ---------------------------------------------------------------------------

/// The bearer token failed signature verification, was malformed, or expired.
pub const COULD_NOT_DECODE_TOKEN: &str = "could not decode token";

/// The token decoded but no user row matches its subject id.
pub const NO_USER_FOUND_MATCHING_TOKEN: &str = "no user found matching this token";

/// The token's user exists but has been deactivated.
pub const USER_HAS_BEEN_DEACTIVATED: &str = "user has been deactivated";

/// An endpoint that requires identity was called without a usable credential.
pub const AUTHENTICATION_REQUIRED: &str = "authentication required";

// ---------------------------------------------------------------------------
// Registration / login
// ---------------------------------------------------------------------------

/// Login failure. Deliberately identical for unknown email, wrong password,
/// and deactivated account so callers cannot enumerate users.
pub const NO_USER_FOUND_WITH_EMAIL_PASSWORD: &str = "no user found with matching email/password";

pub const EMAIL_IS_REQUIRED: &str = "email is required";

pub const PASSWORD_IS_REQUIRED: &str = "password is required";

pub const USERNAME_IS_REQUIRED: &str = "username is required";

/// Uniqueness conflicts surface as validation failures (400), worded per
/// field.
pub const EMAIL_ALREADY_TAKEN: &str = "email is already taken";

pub const USERNAME_ALREADY_TAKEN: &str = "username is already taken";

pub const SLUG_ALREADY_TAKEN: &str = "an article with this slug already exists";

/// Password length bounds, inclusive.
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

// ---------------------------------------------------------------------------
// Social graph
// ---------------------------------------------------------------------------

pub const CANNOT_FOLLOW_YOURSELF: &str = "cannot follow yourself";

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Avatar served when a profile has no image of its own.
pub const DEFAULT_PROFILE_IMAGE: &str =
    "https://static.productionready.io/images/smiley-cyrus.jpg";
