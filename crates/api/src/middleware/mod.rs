//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rate_limit::rate_limit`] -- Per-caller request quota for the API routes.

pub mod auth;
pub mod rate_limit;
