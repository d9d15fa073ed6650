use crate::types::DbId;

/// Domain error taxonomy.
///
/// Each variant maps to exactly one HTTP status at the API boundary:
/// `Validation` -> 400, `AuthenticationFailed` -> 403 (this API reports
/// credential failures as forbidden, not unauthorized), `NotFound` -> 404,
/// `Permission` -> 403, `Internal` -> 500.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Not-found error for an entity addressed by a string key
    /// (username, slug).
    pub fn not_found(entity: &'static str, key: &str) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Not-found error for an entity addressed by its numeric id.
    pub fn not_found_id(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound {
            entity,
            key: id.to_string(),
        }
    }
}
