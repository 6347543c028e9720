//! Auth Error Types
//!
//! Auth-specific error variants that lower into the shared
//! `kernel::error::AppError`.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email address is already registered")]
    EmailTaken,

    #[error("Email address is already verified")]
    EmailAlreadyVerified,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Unknown and expired tokens both land here, with the same message
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Uniqueness violation on a token value within one kind
    #[error("Token value already in use")]
    DuplicateToken,

    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken | AuthError::DuplicateToken => ErrorKind::Conflict,
            AuthError::EmailAlreadyVerified => ErrorKind::UnprocessableEntity,
            AuthError::InvalidEmail(_)
            | AuthError::InvalidToken
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log with a level matching the severity
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidToken => {
                tracing::info!("Rejected invalid or expired token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // Keep SQLSTATE-aware classification from the kernel
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::PasswordValidation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
