//! Rating entity model, request DTOs and validated write structs.

use ratings_core::rating::{ValidNewRating, ValidRatingUpdate};
use ratings_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A row from the `ratings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub role_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /api/ratings`.
///
/// Fields stay raw JSON so type mismatches are reported per field by the
/// validation rules. Carries no `user_id`: the author is always the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRating {
    #[serde(default)]
    pub role_id: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub comment: Option<Value>,
}

/// Request body for `PUT /api/ratings/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRating {
    #[serde(default)]
    pub rating: Option<Value>,
    /// `None`: key absent. `Some(Value::Null)`: explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub comment: Option<Value>,
}

/// Marks a field as present whenever its key appears, even with a `null` value.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Validated insert for the `ratings` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub user_id: DbId,
    pub role_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
}

impl NewRating {
    /// Attach the author to validated request fields.
    pub fn authored_by(user_id: DbId, fields: ValidNewRating) -> Self {
        Self {
            user_id,
            role_id: fields.role_id,
            rating: fields.rating,
            comment: fields.comment,
        }
    }
}

/// Validated changes for an existing rating. `role_id` and `user_id` are
/// intentionally absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingChanges {
    pub rating: i16,
    /// `None` leaves the stored comment untouched.
    pub comment: Option<Option<String>>,
}

impl From<ValidRatingUpdate> for RatingChanges {
    fn from(update: ValidRatingUpdate) -> Self {
        Self {
            rating: update.rating,
            comment: update.comment,
        }
    }
}

impl Rating {
    /// Apply `changes` in place, mirroring the `UPDATE` the repository issues.
    pub fn apply(&mut self, changes: &RatingChanges) {
        self.rating = changes.rating;
        if let Some(comment) = &changes.comment {
            self.comment.clone_from(comment);
        }
    }
}
