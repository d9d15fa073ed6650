//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- stateless bearer-token encoding and decoding.

pub mod password;
pub mod token;
