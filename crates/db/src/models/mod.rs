//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs, with every field optional so that missing
//!   values surface as validation failures rather than body rejections
//! - Validated insert/update structs handed to the repositories

pub mod rating;
pub mod role;
