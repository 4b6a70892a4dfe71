//! Display Name Value Object
//!
//! The name shown on posts and comments. An empty display name is a legal
//! user state (fresh federated accounts) but never a legal input.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum display name length (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 40;

/// Trimmed, non-empty display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = input.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AppError::invalid_input("Display name is required")
                .with_action("Enter a display name"));
        }

        if trimmed.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Display name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
