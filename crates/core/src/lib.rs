//! Domain types, validation rules and the authorization policy for ratings.
//!
//! Nothing in this crate touches the database or HTTP; both the `db` and
//! `api` crates build on it.

pub mod error;
pub mod policy;
pub mod rating;
pub mod roles;
pub mod types;
