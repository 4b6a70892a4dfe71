//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::IssuedSession;
use crate::domain::entity::session_claims::SessionClaims;
use crate::domain::value_object::credential::AuthProvider;

// ============================================================================
// Register
// ============================================================================

/// Local registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub email: String,
}

// ============================================================================
// Login
// ============================================================================

/// Local login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User name or email
    pub identifier: String,
    pub password: String,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

// ============================================================================
// User snapshot
// ============================================================================

/// Public user snapshot, identical to what the token carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub requires_profile_setup: bool,
    pub federated_display_name: Option<String>,
    pub username: Option<String>,
    pub provider: AuthProvider,
}

impl From<&SessionClaims> for UserResponse {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            id: claims.sub.to_string(),
            email: claims.email.clone(),
            display_name: claims.display_name.clone(),
            avatar_url: claims.avatar_url.clone(),
            requires_profile_setup: claims.requires_profile_setup,
            federated_display_name: claims.federated_display_name.clone(),
            username: claims.username.clone(),
            provider: claims.provider,
        }
    }
}

/// `{token, user}` returned by register, login and profile update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<IssuedSession> for AuthResponse {
    fn from(session: IssuedSession) -> Self {
        Self {
            user: UserResponse::from(&session.claims),
            token: session.token,
        }
    }
}
