use axum::routing::get;
use axum::Router;

use crate::handlers::docs;
use crate::state::AppState;

/// API documentation routes mounted at `/docs`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(docs::openapi_json))
}
