//! Store abstractions consumed by the HTTP layer.
//!
//! Handlers depend on these traits rather than on a pool so the store can be
//! swapped (e.g. an in-memory store in API tests). [`PgStore`] is the
//! production implementation and simply delegates to the repositories.

use async_trait::async_trait;
use ratings_core::types::DbId;

use crate::models::rating::{NewRating, Rating, RatingChanges};
use crate::repositories::{RatingRepo, RoleRepo};
use crate::DbPool;

/// Durable CRUD storage for ratings.
#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Rating>, sqlx::Error>;

    async fn find(&self, id: DbId) -> Result<Option<Rating>, sqlx::Error>;

    async fn insert(&self, input: &NewRating) -> Result<Rating, sqlx::Error>;

    /// `Ok(None)` when no row with `id` exists.
    async fn update(&self, id: DbId, changes: &RatingChanges)
        -> Result<Option<Rating>, sqlx::Error>;

    /// `Ok(false)` when no row with `id` exists.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// The role reference set that `role_id` values are checked against.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn role_exists(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// PostgreSQL-backed [`RatingStore`] and [`RoleDirectory`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStore for PgStore {
    async fn list(&self) -> Result<Vec<Rating>, sqlx::Error> {
        RatingRepo::list(&self.pool).await
    }

    async fn find(&self, id: DbId) -> Result<Option<Rating>, sqlx::Error> {
        RatingRepo::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, input: &NewRating) -> Result<Rating, sqlx::Error> {
        RatingRepo::create(&self.pool, input).await
    }

    async fn update(
        &self,
        id: DbId,
        changes: &RatingChanges,
    ) -> Result<Option<Rating>, sqlx::Error> {
        RatingRepo::update(&self.pool, id, changes).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        RatingRepo::delete(&self.pool, id).await
    }
}

#[async_trait]
impl RoleDirectory for PgStore {
    async fn role_exists(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let exists = RoleRepo::exists(&self.pool, id).await?;
        if !exists {
            tracing::debug!(role_id = id, "Role lookup missed");
        }
        Ok(exists)
    }
}
