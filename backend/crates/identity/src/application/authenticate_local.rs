//! Authenticate Local Use Case
//!
//! Verifies a username-or-email plus password.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{IdentityError, IdentityResult};

/// Sign in input
pub struct AuthenticateLocalInput {
    /// User name or email
    pub identifier: String,
    pub password: String,
}

/// Sign in use case
pub struct AuthenticateLocalUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> AuthenticateLocalUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    /// Every failure path is the same `InvalidCredentials`, so callers
    /// cannot tell an unknown identifier from a wrong password.
    pub async fn execute(&self, input: AuthenticateLocalInput) -> IdentityResult<User> {
        let identifier = UserName::normalize(&input.identifier);
        if identifier.is_empty() {
            return Err(IdentityError::InvalidCredentials);
        }

        let user = match self.repo.find_by_username(&identifier).await? {
            Some(user) => Some(user),
            None => self.repo.find_by_email(&identifier).await?,
        };
        let user = user.ok_or(IdentityError::InvalidCredentials)?;

        // Federated accounts have no password to check
        let hash = user.password().ok_or(IdentityError::InvalidCredentials)?;

        let raw_password = RawPassword::for_verification(input.password);
        if !hash.verify(&raw_password, self.config.pepper()) {
            return Err(IdentityError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(user)
    }
}
