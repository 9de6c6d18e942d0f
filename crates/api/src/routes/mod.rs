pub mod docs;
pub mod health;
pub mod rating;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ratings                 list (public), create (requires auth)
/// /ratings/{id}            show (public), update, delete (require auth)
///
/// /docs/openapi.json       OpenAPI document (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/ratings", rating::router())
        .nest("/docs", docs::router())
}
