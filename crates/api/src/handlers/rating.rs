//! Handlers for the rating resource.
//!
//! Listing and showing are public; creating, updating and deleting require
//! an authenticated caller. Only updates consult the authorization policy.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use ratings_core::error::CoreError;
use ratings_core::policy::authorize_rating_update;
use ratings_core::rating::{integer_value, validate_create, validate_update, RoleReference};
use ratings_core::types::DbId;
use ratings_db::models::rating::{CreateRating, NewRating, Rating, RatingChanges, UpdateRating};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{MessageResponse, RatingResponse};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

fn rating_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Rating",
        id,
    })
}

/// Unwrap a JSON body, reporting decode failures as 400.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(input)| input)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Read the `{id}` segment. An id that does not parse cannot name a
/// rating, so it is reported as not found.
fn rating_id(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unparsable rating id");
        AppError::NotFound("Rating not found".to_string())
    })
}

/// Check `role_id` against the role directory, when one was supplied.
async fn resolve_role(state: &AppState, role_id: Option<&Value>) -> AppResult<RoleReference> {
    let Some(raw) = role_id.filter(|v| !v.is_null()) else {
        return Ok(RoleReference::Missing);
    };
    let Some(id) = integer_value(raw) else {
        return Ok(RoleReference::Malformed);
    };
    if state.roles.role_exists(id).await? {
        Ok(RoleReference::Known(id))
    } else {
        Ok(RoleReference::Unknown(id))
    }
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /ratings
pub async fn list_ratings(State(state): State<AppState>) -> AppResult<Json<Vec<Rating>>> {
    let ratings = state.ratings.list().await?;
    Ok(Json(ratings))
}

/// POST /ratings
///
/// Create a rating authored by the caller. Any `user_id` in the body is
/// ignored.
pub async fn create_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<CreateRating>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = json_body(body)?;

    let role = resolve_role(&state, input.role_id.as_ref()).await?;
    let fields = validate_create(role, input.rating.as_ref(), input.comment.as_ref())?;

    let rating = state
        .ratings
        .insert(&NewRating::authored_by(auth.user_id, fields))
        .await?;

    tracing::info!(
        rating_id = rating.id,
        user_id = auth.user_id,
        role_id = rating.role_id,
        "Rating created",
    );

    Ok((
        StatusCode::CREATED,
        Json(RatingResponse {
            message: "Rating added successfully",
            rating,
        }),
    ))
}

/// GET /ratings/{id}
pub async fn get_rating(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Rating>> {
    let id = rating_id(path)?;
    let rating = state
        .ratings
        .find(id)
        .await?
        .ok_or_else(|| rating_not_found(id))?;
    Ok(Json(rating))
}

/// PUT /ratings/{id}
///
/// Overwrite `rating`, and `comment` when its key is present. The record is
/// resolved and the caller authorized before the body is looked at.
pub async fn update_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    body: Result<Json<UpdateRating>, JsonRejection>,
) -> AppResult<Json<RatingResponse>> {
    let id = rating_id(path)?;
    let existing = state
        .ratings
        .find(id)
        .await?
        .ok_or_else(|| rating_not_found(id))?;

    if let Err(err) = authorize_rating_update(auth.actor(), existing.user_id) {
        tracing::warn!(
            rating_id = id,
            user_id = auth.user_id,
            owner_id = existing.user_id,
            "Rating update denied",
        );
        return Err(err.into());
    }

    let input = json_body(body)?;
    let fields = validate_update(input.rating.as_ref(), input.comment.as_ref())?;

    // The row may have been deleted since the lookup above.
    let rating = state
        .ratings
        .update(id, &RatingChanges::from(fields))
        .await?
        .ok_or_else(|| rating_not_found(id))?;

    tracing::info!(rating_id = id, user_id = auth.user_id, "Rating updated");

    Ok(Json(RatingResponse {
        message: "Rating updated successfully",
        rating,
    }))
}

/// DELETE /ratings/{id}
pub async fn delete_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let id = rating_id(path)?;
    if !state.ratings.delete(id).await? {
        return Err(rating_not_found(id));
    }

    tracing::info!(rating_id = id, user_id = auth.user_id, "Rating deleted");

    Ok(Json(MessageResponse {
        message: "Rating deleted successfully",
    }))
}
