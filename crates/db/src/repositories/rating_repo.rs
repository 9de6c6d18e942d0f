//! Repository for the `ratings` table.

use ratings_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{NewRating, Rating, RatingChanges};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, role_id, rating, comment, created_at, updated_at";

/// Provides CRUD operations for ratings.
pub struct RatingRepo;

impl RatingRepo {
    /// List every rating, ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings ORDER BY id ASC");
        sqlx::query_as::<_, Rating>(&query).fetch_all(pool).await
    }

    /// Find a rating by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE id = $1");
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new rating, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewRating) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (user_id, role_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(input.user_id)
            .bind(input.role_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Overwrite `rating`, and `comment` when the change carries one.
    ///
    /// Returns `None` if the row no longer exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &RatingChanges,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "UPDATE ratings SET
                rating = $1,
                comment = CASE WHEN $2 THEN $3 ELSE comment END
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(changes.rating)
            .bind(changes.comment.is_some())
            .bind(changes.comment.as_ref().and_then(Option::as_deref))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rating by its ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
