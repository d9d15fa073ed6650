use std::sync::Arc;

use crate::auth::token::TokenCodec;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: conduit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Token codec for issuing and verifying bearer tokens. Constructed
    /// once from the JWT config; never read from a global.
    pub tokens: TokenCodec,
}

impl AppState {
    /// Build state from a pool and configuration.
    pub fn new(pool: conduit_db::DbPool, config: ServerConfig) -> Self {
        let tokens = TokenCodec::new(config.jwt.clone());
        Self {
            pool,
            config: Arc::new(config),
            tokens,
        }
    }
}
