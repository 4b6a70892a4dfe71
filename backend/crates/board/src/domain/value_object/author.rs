//! Author Snapshot
//!
//! Copy of the author's public identity taken when a post or comment is
//! written. Later profile edits do not reach existing content.

use kernel::id::UserId;

use crate::domain::guard::Actor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSnapshot {
    pub author_id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl AuthorSnapshot {
    pub fn of(actor: &Actor) -> Self {
        Self {
            author_id: actor.user_id,
            display_name: actor.display_name.trim().to_string(),
            avatar_url: actor.avatar_url.clone(),
        }
    }
}
