//! Route definitions for the rating resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::rating;
use crate::state::AppState;

/// Rating routes mounted at `/ratings`.
///
/// ```text
/// GET    /        -> list_ratings
/// POST   /        -> create_rating
/// GET    /{id}    -> get_rating
/// PUT    /{id}    -> update_rating
/// DELETE /{id}    -> delete_rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rating::list_ratings).post(rating::create_rating))
        .route(
            "/{id}",
            get(rating::get_rating)
                .put(rating::update_rating)
                .delete(rating::delete_rating),
        )
}
