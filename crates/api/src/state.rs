use std::sync::Arc;

use ratings_db::store::{RatingStore, RoleDirectory};

use crate::config::ServerConfig;
use crate::middleware::rate_limit::KeyedRateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used by the health check.
    pub pool: ratings_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Rating record storage.
    pub ratings: Arc<dyn RatingStore>,
    /// Role reference set consulted during validation.
    pub roles: Arc<dyn RoleDirectory>,
    /// Per-caller request quota for the `/api` routes.
    pub rate_limiter: KeyedRateLimiter,
}
