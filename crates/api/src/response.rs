//! Shared response envelope types for API handlers.
//!
//! Mutations answer with a human-readable `message`, plus the affected
//! record when there is one. Reads return the bare record or array.

use ratings_db::models::rating::Rating;
use serde::Serialize;

/// `{ "message": ... }` envelope for mutations with no record to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "message": ..., "rating": ... }` envelope for create and update.
#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub message: &'static str,
    pub rating: Rating,
}
