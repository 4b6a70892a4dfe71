//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::{credential::AuthProvider, email::Email, user_name::UserName};
use crate::error::IdentityResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> IdentityResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>>;

    /// Find user by (lower-cased) email
    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<User>>;

    /// Find local user by (lower-cased) user name
    async fn find_by_username(&self, username: &str) -> IdentityResult<Option<User>>;

    /// Find federated user by provider identity
    async fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> IdentityResult<Option<User>>;

    /// Update user
    async fn update(&self, user: &User) -> IdentityResult<()>;
}

/// Convenience lookups shared by the use cases
pub(crate) async fn username_exists<R: UserRepository>(
    repo: &R,
    username: &UserName,
) -> IdentityResult<bool> {
    Ok(repo.find_by_username(username.as_str()).await?.is_some())
}

pub(crate) async fn email_exists<R: UserRepository>(
    repo: &R,
    email: &Email,
) -> IdentityResult<bool> {
    Ok(repo.find_by_email(email.as_str()).await?.is_some())
}
