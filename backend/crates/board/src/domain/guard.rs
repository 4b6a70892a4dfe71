//! Authorization Guard
//!
//! Pure predicates over the acting user and the entity being touched.
//! No I/O: callers evaluate them against the snapshot they already hold.

use kernel::id::UserId;

use crate::error::{BoardError, BoardResult};

/// The authenticated user behind a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Anything with an immutable author
pub trait Authored {
    fn author_id(&self) -> &UserId;
}

/// Actor is present and is the author
pub fn can_mutate<E: Authored>(actor: Option<&Actor>, entity: &E) -> bool {
    actor.is_some_and(|a| &a.user_id == entity.author_id())
}

/// Actor is present and has a non-blank display name
pub fn has_usable_identity(actor: Option<&Actor>) -> bool {
    actor.is_some_and(|a| !a.display_name.trim().is_empty())
}

pub fn ensure_owner<E: Authored>(actor: &Actor, entity: &E) -> BoardResult<()> {
    if can_mutate(Some(actor), entity) {
        Ok(())
    } else {
        Err(BoardError::NotOwner)
    }
}

pub fn ensure_usable_identity(actor: &Actor) -> BoardResult<()> {
    if has_usable_identity(Some(actor)) {
        Ok(())
    } else {
        Err(BoardError::DisplayNameRequired)
    }
}
