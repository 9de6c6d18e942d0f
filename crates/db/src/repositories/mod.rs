//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod rating_repo;
pub mod role_repo;

pub use rating_repo::RatingRepo;
pub use role_repo::RoleRepo;
