//! Credential Path
//!
//! A user authenticates either with a local password or through exactly one
//! federated identity provider, never both.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_password::UserPassword;

/// Where a user's identity is asserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[display("local")]
    Local,
    #[display("google")]
    Google,
}

impl AuthProvider {
    pub fn code(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }

    pub fn is_federated(&self) -> bool {
        !matches!(self, AuthProvider::Local)
    }
}

impl FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            other => Err(format!("Unknown auth provider: {other}")),
        }
    }
}

/// How the user proves who they are
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Password(UserPassword),
    Federated {
        provider: AuthProvider,
        provider_id: String,
    },
}

impl Credential {
    pub fn provider(&self) -> AuthProvider {
        match self {
            Credential::Password(_) => AuthProvider::Local,
            Credential::Federated { provider, .. } => *provider,
        }
    }

    pub fn password(&self) -> Option<&UserPassword> {
        match self {
            Credential::Password(hash) => Some(hash),
            Credential::Federated { .. } => None,
        }
    }

    pub fn provider_id(&self) -> Option<&str> {
        match self {
            Credential::Password(_) => None,
            Credential::Federated { provider_id, .. } => Some(provider_id),
        }
    }
}
