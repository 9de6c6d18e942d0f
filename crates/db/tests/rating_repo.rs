//! Integration tests for the ratings and roles repositories.
//!
//! These run against a real PostgreSQL database (`DATABASE_URL`), one fresh
//! database per test with the embedded migrations applied:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p ratings-db -- --ignored
//! ```

use ratings_db::models::rating::{NewRating, RatingChanges};
use ratings_db::models::role::CreateRole;
use ratings_db::repositories::{RatingRepo, RoleRepo};
use ratings_db::store::{PgStore, RatingStore, RoleDirectory};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_role(pool: &PgPool, name: &str) -> i64 {
    RoleRepo::create(
        pool,
        &CreateRole {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .expect("role insert should succeed")
    .id
}

fn new_rating(user_id: i64, role_id: i64, rating: i16, comment: Option<&str>) -> NewRating {
    NewRating {
        user_id,
        role_id,
        rating,
        comment: comment.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn role_exists_reflects_table_contents(pool: PgPool) {
    let role_id = seed_role(&pool, "backend-engineer").await;

    assert!(RoleRepo::exists(&pool, role_id).await.unwrap());
    assert!(!RoleRepo::exists(&pool, role_id + 1000).await.unwrap());

    let role = RoleRepo::find_by_id(&pool, role_id).await.unwrap().unwrap();
    assert_eq!(role.name, "backend-engineer");
}

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn duplicate_role_name_is_rejected(pool: PgPool) {
    seed_role(&pool, "designer").await;

    let err = RoleRepo::create(
        &pool,
        &CreateRole {
            name: "designer".to_string(),
            description: None,
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_roles_name"));
}

// ---------------------------------------------------------------------------
// Ratings CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn create_find_and_list(pool: PgPool) {
    let role_id = seed_role(&pool, "reviewer").await;

    let created = RatingRepo::create(&pool, &new_rating(7, role_id, 5, Some("Great")))
        .await
        .unwrap();
    assert_eq!(created.user_id, 7);
    assert_eq!(created.role_id, role_id);
    assert_eq!(created.rating, 5);
    assert_eq!(created.comment.as_deref(), Some("Great"));

    let found = RatingRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(found, Some(created.clone()));

    RatingRepo::create(&pool, &new_rating(8, role_id, 3, None))
        .await
        .unwrap();

    let all = RatingRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, created.id, "list is ordered by id");
}

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn update_overwrites_rating_and_respects_comment_presence(pool: PgPool) {
    let role_id = seed_role(&pool, "analyst").await;
    let created = RatingRepo::create(&pool, &new_rating(7, role_id, 5, Some("Great")))
        .await
        .unwrap();

    let kept = RatingRepo::update(&pool, created.id, &RatingChanges { rating: 2, comment: None })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.rating, 2);
    assert_eq!(kept.comment.as_deref(), Some("Great"));
    assert_eq!((kept.user_id, kept.role_id), (7, role_id));

    let cleared = RatingRepo::update(
        &pool,
        created.id,
        &RatingChanges {
            rating: 3,
            comment: Some(None),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.comment, None);
    assert!(cleared.updated_at >= created.updated_at);
}

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn update_missing_row_returns_none(pool: PgPool) {
    let result = RatingRepo::update(&pool, 4242, &RatingChanges { rating: 1, comment: None })
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn delete_is_not_idempotent(pool: PgPool) {
    let role_id = seed_role(&pool, "tester").await;
    let created = RatingRepo::create(&pool, &new_rating(7, role_id, 4, None))
        .await
        .unwrap();

    assert!(RatingRepo::delete(&pool, created.id).await.unwrap());
    assert!(!RatingRepo::delete(&pool, created.id).await.unwrap());
    assert!(RatingRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn rating_out_of_range_violates_check_constraint(pool: PgPool) {
    let role_id = seed_role(&pool, "ops").await;

    let err = RatingRepo::create(&pool, &new_rating(7, role_id, 6, None))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("ck_ratings_rating_range"));
}

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn unknown_role_violates_foreign_key(pool: PgPool) {
    let err = RatingRepo::create(&pool, &new_rating(7, 999, 3, None))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn deleting_role_cascades_to_ratings(pool: PgPool) {
    let role_id = seed_role(&pool, "temp").await;
    let created = RatingRepo::create(&pool, &new_rating(7, role_id, 4, None))
        .await
        .unwrap();

    sqlx::query("DELETE FROM roles WHERE id = $1")
        .bind(role_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(RatingRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Store trait delegation
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn pg_store_round_trip(pool: PgPool) {
    let role_id = seed_role(&pool, "store").await;
    let store = PgStore::new(pool);

    assert!(store.role_exists(role_id).await.unwrap());
    assert!(!store.role_exists(role_id + 1).await.unwrap());

    let created = store.insert(&new_rating(1, role_id, 3, None)).await.unwrap();
    assert_eq!(store.find(created.id).await.unwrap(), Some(created.clone()));
    assert_eq!(store.list().await.unwrap().len(), 1);
    assert!(store.delete(created.id).await.unwrap());
    assert!(store.find(created.id).await.unwrap().is_none());
}

#[sqlx::test(migrator = "ratings_db::MIGRATOR")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn health_check_succeeds(pool: PgPool) {
    ratings_db::health_check(&pool).await.unwrap();
}
