//! Rating field limits and request validation rules.
//!
//! Checks run in a fixed order (`role_id`, `rating`, `comment`) and collect
//! every failure into a [`FieldErrors`] set instead of stopping at the first
//! one, so callers can correct all fields in one round trip.

use serde_json::Value;

use crate::error::{CoreError, FieldErrors};
use crate::types::DbId;

/* --------------------------------------------------------------------------
Limits
-------------------------------------------------------------------------- */

/// Minimum allowed rating value.
pub const MIN_RATING: i16 = 1;

/// Maximum allowed rating value.
pub const MAX_RATING: i16 = 5;

/// Maximum comment length, counted in characters.
pub const MAX_COMMENT_LEN: usize = 255;

/* --------------------------------------------------------------------------
Inputs
-------------------------------------------------------------------------- */

/// Outcome of looking up a `role_id` in the role reference set.
///
/// The lookup is I/O, so the handler resolves it up front and the rules
/// below stay pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleReference {
    /// The field was absent or null.
    Missing,
    /// The field is not an integer, so it cannot name a role.
    Malformed,
    /// The field names a role that does not exist.
    Unknown(DbId),
    /// The field names an existing role.
    Known(DbId),
}

/// Validated fields of a new rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNewRating {
    pub role_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
}

/// Validated fields of a rating update.
///
/// `comment` is `None` when the key was absent from the request (keep the
/// stored value) and `Some(None)` when it was explicitly cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRatingUpdate {
    pub rating: i16,
    pub comment: Option<Option<String>>,
}

/// Read a JSON integer, or a string holding one (`5` and `"5"` both count).
pub fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/* --------------------------------------------------------------------------
Rules
-------------------------------------------------------------------------- */

/// Validate the fields of a create request.
///
/// Field values arrive as raw JSON so that a wrong type is reported against
/// its field alongside every other failure.
pub fn validate_create(
    role: RoleReference,
    rating: Option<&Value>,
    comment: Option<&Value>,
) -> Result<ValidNewRating, CoreError> {
    let mut errors = FieldErrors::new();

    let role_id = check_role(&mut errors, role);
    let rating = check_rating(&mut errors, rating);
    let comment = check_comment(&mut errors, comment);

    match (role_id, rating) {
        (Some(role_id), Some(rating)) if errors.is_empty() => Ok(ValidNewRating {
            role_id,
            rating,
            comment,
        }),
        _ => Err(CoreError::InvalidFields(errors)),
    }
}

/// Validate the fields of an update request. `role_id` is not part of the
/// update surface and is never checked here.
///
/// `comment` is `None` when the key was absent; a present `null` clears it.
pub fn validate_update(
    rating: Option<&Value>,
    comment: Option<&Value>,
) -> Result<ValidRatingUpdate, CoreError> {
    let mut errors = FieldErrors::new();

    let rating = check_rating(&mut errors, rating);
    let comment = comment.map(|value| check_comment(&mut errors, Some(value)));

    match rating {
        Some(rating) if errors.is_empty() => Ok(ValidRatingUpdate { rating, comment }),
        _ => Err(CoreError::InvalidFields(errors)),
    }
}

/// Trim surrounding whitespace and treat an empty comment as no comment.
pub fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn check_role(errors: &mut FieldErrors, role: RoleReference) -> Option<DbId> {
    match role {
        RoleReference::Known(id) => Some(id),
        RoleReference::Unknown(_) | RoleReference::Malformed => {
            errors.add("role_id", "The selected role id is invalid.");
            None
        }
        RoleReference::Missing => {
            errors.add("role_id", "The role id field is required.");
            None
        }
    }
}

fn check_rating(errors: &mut FieldErrors, rating: Option<&Value>) -> Option<i16> {
    let Some(raw) = rating.filter(|v| !v.is_null()) else {
        errors.add("rating", "The rating field is required.");
        return None;
    };

    let Some(value) = integer_value(raw) else {
        errors.add("rating", "The rating must be an integer.");
        return None;
    };

    match i16::try_from(value) {
        Ok(v) if (MIN_RATING..=MAX_RATING).contains(&v) => Some(v),
        _ => {
            errors.add(
                "rating",
                format!("The rating must be between {MIN_RATING} and {MAX_RATING}, got {value}."),
            );
            None
        }
    }
}

/// Absent and `null` both mean no comment.
fn check_comment(errors: &mut FieldErrors, comment: Option<&Value>) -> Option<String> {
    let text = match comment {
        None | Some(Value::Null) => return None,
        Some(Value::String(text)) => text,
        Some(_) => {
            errors.add("comment", "The comment must be a string.");
            return None;
        }
    };

    let comment = normalize_comment(Some(text.clone()))?;
    let len = comment.chars().count();
    if len > MAX_COMMENT_LEN {
        errors.add(
            "comment",
            format!("The comment may not be greater than {MAX_COMMENT_LEN} characters, got {len}."),
        );
        return None;
    }
    Some(comment)
}
