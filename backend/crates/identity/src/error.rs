//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// User name already registered
    #[error("User name is already taken")]
    UserNameTaken,

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown identifier or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("Authentication required")]
    MissingToken,

    /// Token signature or format is invalid
    #[error("Session token is invalid")]
    TokenInvalid,

    /// Token is past its expiry
    #[error("Session token has expired")]
    TokenExpired,

    /// Field validation failure
    #[error("{0}")]
    InvalidInput(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::UserNotFound => ErrorKind::NotFound,
            IdentityError::UserNameTaken | IdentityError::EmailTaken => ErrorKind::Conflict,
            IdentityError::InvalidCredentials
            | IdentityError::MissingToken
            | IdentityError::TokenInvalid
            | IdentityError::TokenExpired => ErrorKind::Unauthorized,
            IdentityError::InvalidInput(_) => ErrorKind::InvalidInput,
            IdentityError::Database(_) | IdentityError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    ///
    /// Storage and internal details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            IdentityError::MissingToken => AppError::unauthorized(self.to_string())
                .with_action("Send an Authorization: Bearer <token> header"),
            IdentityError::TokenExpired => {
                AppError::unauthorized(self.to_string()).with_action("Sign in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            IdentityError::TokenInvalid => {
                tracing::warn!("Rejected tampered or malformed session token");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => IdentityError::InvalidInput(err.message().to_string()),
            _ => IdentityError::Internal(err.to_string()),
        }
    }
}

impl From<platform::password::PasswordHashError> for IdentityError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        IdentityError::Internal(err.to_string())
    }
}

impl From<platform::token::TokenError> for IdentityError {
    fn from(err: platform::token::TokenError) -> Self {
        use platform::token::TokenError;
        match err {
            TokenError::Encode(e) => IdentityError::Internal(e.to_string()),
            TokenError::InvalidKey => IdentityError::Internal(err.to_string()),
            TokenError::Malformed | TokenError::BadSignature | TokenError::Decode(_) => {
                IdentityError::TokenInvalid
            }
        }
    }
}
