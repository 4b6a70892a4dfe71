//! In-Memory Repository Implementation
//!
//! Backs tests and database-less runs. Uniqueness mirrors the unique
//! indexes of the `users` table.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::credential::AuthProvider;
use crate::error::{IdentityError, IdentityResult};

#[derive(Clone, Default)]
pub struct InMemoryIdentityRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_by<F>(&self, predicate: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users
            .read()
            .await
            .values()
            .find(|u| predicate(u))
            .cloned()
    }
}

impl UserRepository for InMemoryIdentityRepository {
    async fn create(&self, user: &User) -> IdentityResult<()> {
        let mut users = self.users.write().await;

        for existing in users.values() {
            if user.username.is_some() && existing.username == user.username {
                return Err(IdentityError::UserNameTaken);
            }
            if existing.email == user.email {
                return Err(IdentityError::EmailTaken);
            }
            if user.credential.provider_id().is_some()
                && existing.provider() == user.provider()
                && existing.credential.provider_id() == user.credential.provider_id()
            {
                return Err(IdentityError::Internal(
                    "Duplicate federated identity".to_string(),
                ));
            }
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<User>> {
        Ok(self.find_by(|u| u.email.as_str() == email).await)
    }

    async fn find_by_username(&self, username: &str) -> IdentityResult<Option<User>> {
        Ok(self
            .find_by(|u| u.username.as_ref().is_some_and(|n| n.as_str() == username))
            .await)
    }

    async fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> IdentityResult<Option<User>> {
        Ok(self
            .find_by(|u| {
                u.provider() == provider && u.credential.provider_id() == Some(provider_id)
            })
            .await)
    }

    async fn update(&self, user: &User) -> IdentityResult<()> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.user_id != user.user_id && u.email == user.email)
        {
            return Err(IdentityError::EmailTaken);
        }

        match users.get_mut(&user.user_id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => Err(IdentityError::UserNotFound),
        }
    }
}
