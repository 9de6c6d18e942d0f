//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (and generation, used by tooling
//!   and tests that stand in for the identity provider).

pub mod jwt;
