//! Update Profile Use Case
//!
//! Sets the display name, completing profile setup.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::display_name::DisplayName;
use crate::error::{IdentityError, IdentityResult};

pub struct UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId, display_name: &str) -> IdentityResult<User> {
        let display_name = DisplayName::new(display_name)?;

        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        user.set_display_name(display_name);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Display name updated");

        Ok(user)
    }
}
