//! Resolve Federated Use Case
//!
//! Upserts the user behind a completed identity-provider handshake.

use std::sync::Arc;

use crate::domain::entity::user::{FederatedProfile, User};
use crate::domain::repository::UserRepository;
use crate::error::{IdentityError, IdentityResult};

pub struct ResolveFederatedUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ResolveFederatedUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Existing users get their provider-owned fields refreshed; unknown
    /// identities are provisioned with an empty display name. Profile
    /// completeness never blocks this path.
    pub async fn execute(&self, profile: FederatedProfile) -> IdentityResult<User> {
        if !profile.provider.is_federated() {
            return Err(IdentityError::InvalidInput(
                "Local accounts cannot sign in through a federated provider".into(),
            ));
        }
        if profile.provider_id.trim().is_empty() {
            return Err(IdentityError::InvalidInput("Provider id is required".into()));
        }

        if let Some(mut user) = self
            .repo
            .find_by_provider(profile.provider, &profile.provider_id)
            .await?
        {
            user.refresh_federated(&profile);
            self.repo.update(&user).await?;

            tracing::info!(user_id = %user.user_id, provider = %profile.provider, "Federated user refreshed");
            return Ok(user);
        }

        let user = User::new_federated(profile);
        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            provider = %user.provider(),
            "Federated user provisioned"
        );

        Ok(user)
    }
}
