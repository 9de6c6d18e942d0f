//! Well-known role name constants carried in access-token claims.

/// May update any rating regardless of authorship.
pub const ROLE_ADMIN: &str = "admin";

/// Regular authenticated caller.
pub const ROLE_USER: &str = "user";
