use axum::Json;
use serde_json::Value;

use crate::docs::openapi_document;

/// GET /docs/openapi.json
pub async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}
