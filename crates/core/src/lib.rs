//! Domain layer shared by the persistence and API crates.
//!
//! Holds the error taxonomy, canonical user-facing message strings, common
//! type aliases, and slug generation. No I/O happens here.

pub mod error;
pub mod messages;
pub mod naming;
pub mod types;

pub use error::CoreError;
