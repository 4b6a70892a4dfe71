//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    credential::{AuthProvider, Credential},
    display_name::DisplayName,
    email::Email,
    user_name::UserName,
    user_password::UserPassword,
};

/// User entity
///
/// Never hard-deleted. `username` is present only for local accounts.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    /// Empty until the profile is set up (federated accounts)
    pub display_name: String,
    pub username: Option<UserName>,
    pub credential: Credential,
    pub avatar_url: Option<String>,
    /// Name asserted by the identity provider at last sign-in
    pub federated_display_name: Option<String>,
    pub requires_profile_setup: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile asserted by an identity provider after a successful handshake
#[derive(Debug, Clone)]
pub struct FederatedProfile {
    pub provider: AuthProvider,
    pub provider_id: String,
    pub email: String,
    pub display_name_hint: Option<String>,
    pub avatar_url: Option<String>,
}

impl User {
    /// Local registration; the display name is supplied up front.
    pub fn new_local(
        username: UserName,
        email: Email,
        display_name: DisplayName,
        password: UserPassword,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            display_name: display_name.into_inner(),
            username: Some(username),
            credential: Credential::Password(password),
            avatar_url: None,
            federated_display_name: None,
            requires_profile_setup: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// First federated sign-in: auto-provisioned without a display name.
    pub fn new_federated(profile: FederatedProfile) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email: Email::from_provider(&profile.email),
            display_name: String::new(),
            username: None,
            credential: Credential::Federated {
                provider: profile.provider,
                provider_id: profile.provider_id,
            },
            avatar_url: non_blank(profile.avatar_url),
            federated_display_name: non_blank(profile.display_name_hint),
            requires_profile_setup: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the provider-owned fields on a returning federated sign-in.
    ///
    /// The user's own display name is left untouched.
    pub fn refresh_federated(&mut self, profile: &FederatedProfile) {
        self.email = Email::from_provider(&profile.email);
        self.avatar_url = non_blank(profile.avatar_url.clone());
        self.federated_display_name = non_blank(profile.display_name_hint.clone());
        self.updated_at = Utc::now();
    }

    /// Set the display name and complete profile setup
    pub fn set_display_name(&mut self, display_name: DisplayName) {
        self.display_name = display_name.into_inner();
        self.requires_profile_setup = false;
        self.updated_at = Utc::now();
    }

    pub fn provider(&self) -> AuthProvider {
        self.credential.provider()
    }

    pub fn password(&self) -> Option<&UserPassword> {
        self.credential.password()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google_profile() -> FederatedProfile {
        FederatedProfile {
            provider: AuthProvider::Google,
            provider_id: "g-1".into(),
            email: "Traveler@Gmail.com".into(),
            display_name_hint: Some("Trav Eler".into()),
            avatar_url: Some("https://img/a.png".into()),
        }
    }

    #[test]
    fn test_new_federated_requires_setup() {
        let user = User::new_federated(google_profile());
        assert!(user.requires_profile_setup);
        assert!(user.display_name.is_empty());
        assert!(user.username.is_none());
        assert!(user.password().is_none());
        assert_eq!(user.email.as_str(), "traveler@gmail.com");
        assert_eq!(user.federated_display_name.as_deref(), Some("Trav Eler"));
    }

    #[test]
    fn test_refresh_keeps_display_name() {
        let mut user = User::new_federated(google_profile());
        user.set_display_name(DisplayName::new("Wanderer").unwrap());

        let mut profile = google_profile();
        profile.avatar_url = None;
        profile.display_name_hint = Some("New Hint".into());
        user.refresh_federated(&profile);

        assert_eq!(user.display_name, "Wanderer");
        assert!(!user.requires_profile_setup);
        assert!(user.avatar_url.is_none());
        assert_eq!(user.federated_display_name.as_deref(), Some("New Hint"));
    }
}
