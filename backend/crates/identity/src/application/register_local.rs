//! Register Local Use Case
//!
//! Creates a username/password account.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{UserRepository, email_exists, username_exists};
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{IdentityError, IdentityResult};

/// Register input
pub struct RegisterLocalInput {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub email: String,
}

/// Register use case
pub struct RegisterLocalUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> RegisterLocalUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterLocalInput) -> IdentityResult<User> {
        let username = UserName::new(&input.username)
            .map_err(|e| IdentityError::InvalidInput(e.to_string()))?;
        let display_name = DisplayName::new(&input.display_name)?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        // Username first, then email
        if username_exists(self.repo.as_ref(), &username).await? {
            return Err(IdentityError::UserNameTaken);
        }
        if email_exists(self.repo.as_ref(), &email).await? {
            return Err(IdentityError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new_local(username, email, display_name, password_hash);

        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            username = ?user.username.as_ref().map(|u| u.as_str()),
            "Local user registered"
        );

        Ok(user)
    }
}
