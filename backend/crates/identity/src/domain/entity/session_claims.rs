//! Session Claims
//!
//! The user snapshot carried inside a session token. Anything that reads a
//! token sees the user as of issuance; a profile change requires a new token.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::credential::AuthProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: UserId,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub requires_profile_setup: bool,
    pub provider: AuthProvider,
    pub username: Option<String>,
    pub federated_display_name: Option<String>,
    /// Issued at (epoch ms)
    pub iat: i64,
    /// Expires at (epoch ms)
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_user(user: &User, issued_at_ms: i64, ttl_ms: i64) -> Self {
        Self {
            sub: user.user_id,
            email: user.email.as_str().to_string(),
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
            requires_profile_setup: user.requires_profile_setup,
            provider: user.provider(),
            username: user.username.as_ref().map(|u| u.as_str().to_string()),
            federated_display_name: user.federated_display_name.clone(),
            iat: issued_at_ms,
            exp: issued_at_ms.saturating_add(ttl_ms),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.sub
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.exp
    }
}
