//! Authorization policy for mutating ratings.
//!
//! A rating may be updated by its author or by an administrator. The policy
//! is only consulted for updates; listing, showing, creating and deleting
//! ratings are not gated here.

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// The authenticated caller as seen by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor<'a> {
    pub user_id: DbId,
    pub role: &'a str,
}

/// Whether `actor` may update a rating authored by `owner_id`.
pub fn can_update_rating(actor: Actor<'_>, owner_id: DbId) -> bool {
    actor.user_id == owner_id || actor.role == ROLE_ADMIN
}

/// [`can_update_rating`] as a `Result`, rejecting with [`CoreError::Forbidden`].
pub fn authorize_rating_update(actor: Actor<'_>, owner_id: DbId) -> Result<(), CoreError> {
    if can_update_rating(actor, owner_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "This action is unauthorized.".to_string(),
        ))
    }
}
