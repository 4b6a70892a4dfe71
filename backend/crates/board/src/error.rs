//! Board Error Types
//!
//! Board-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Board-specific result type alias
pub type BoardResult<T> = Result<T, BoardError>;

/// Board-specific error variants
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// Parent id does not resolve to a comment on the same post
    #[error("Parent comment not found")]
    ParentNotFound,

    /// Actor is not the author
    #[error("You can only modify your own content")]
    NotOwner,

    /// Actor has no usable display name
    #[error("Set a display name before writing")]
    DisplayNameRequired,

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

impl BoardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::PostNotFound | BoardError::CommentNotFound | BoardError::ParentNotFound => {
                ErrorKind::NotFound
            }
            BoardError::NotOwner | BoardError::DisplayNameRequired => ErrorKind::Forbidden,
            BoardError::InvalidInput(_) => ErrorKind::InvalidInput,
            BoardError::Database(_) | BoardError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            BoardError::Database(_) | BoardError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            BoardError::DisplayNameRequired => AppError::forbidden(self.to_string())
                .with_action("Complete your profile with a display name"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BoardError::Database(e) => {
                tracing::error!(error = %e, "Board database error");
            }
            BoardError::Internal(msg) => {
                tracing::error!(message = %msg, "Board internal error");
            }
            BoardError::NotOwner | BoardError::DisplayNameRequired => {
                tracing::warn!(error = %self, "Board authorization failure");
            }
            _ => {
                tracing::debug!(error = %self, "Board error");
            }
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for BoardError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => BoardError::InvalidInput(err.message().to_string()),
            _ => BoardError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(BoardError::PostNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(BoardError::ParentNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(BoardError::NotOwner.kind(), ErrorKind::Forbidden);
        assert_eq!(BoardError::DisplayNameRequired.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            BoardError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_storage_errors_are_opaque() {
        let err = BoardError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
