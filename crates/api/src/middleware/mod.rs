//! Request authentication extractors.
//!
//! - [`auth::AuthUser`] -- requires a valid bearer token; rejects otherwise.
//! - [`auth::MaybeAuthUser`] -- resolves identity when a credential is
//!   supplied, anonymous when it is not.

pub mod auth;
