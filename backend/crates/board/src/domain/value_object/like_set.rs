//! Like Set
//!
//! Set of user ids that liked an entity. Order of first like is kept so
//! the persisted array is stable; membership is unique.

use kernel::id::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeSet(Vec<UserId>);

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from storage, dropping duplicates
    pub fn from_db(ids: impl IntoIterator<Item = UserId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.add(id);
        }
        set
    }

    /// Returns `true` if the set changed
    pub fn add(&mut self, user_id: UserId) -> bool {
        if self.contains(&user_id) {
            return false;
        }
        self.0.push(user_id);
        true
    }

    /// Returns `true` if the set changed
    pub fn remove(&mut self, user_id: &UserId) -> bool {
        let before = self.0.len();
        self.0.retain(|id| id != user_id);
        self.0.len() != before
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.0.contains(user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let user = UserId::new();
        let mut once = LikeSet::new();
        assert!(once.add(user));

        let mut twice = LikeSet::new();
        twice.add(user);
        assert!(!twice.add(user));

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_like_then_unlike_restores() {
        let existing = UserId::new();
        let original = LikeSet::from_db([existing]);

        let mut set = original.clone();
        let user = UserId::new();
        set.add(user);
        assert!(set.remove(&user));
        assert_eq!(set, original);
    }

    #[test]
    fn test_unlike_never_liked_is_noop() {
        let mut set = LikeSet::from_db([UserId::new()]);
        let before = set.clone();
        assert!(!set.remove(&UserId::new()));
        assert_eq!(set, before);
    }

    #[test]
    fn test_from_db_dedups() {
        let user = UserId::new();
        let set = LikeSet::from_db([user, user, UserId::new()]);
        assert_eq!(set.len(), 2);
    }
}
