use abacus_core::{HashError, NotificationError, TokenError, UserStoreError};
use thiserror::Error;

/// Every way an authentication flow can fail.
///
/// Only [`AuthError::Unexpected`] is an internal failure; the rest are the
/// caller's fault and carry a message that is safe to show.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already exists")]
    EmailTaken,
    #[error("Invalid username/email or password")]
    InvalidCredentials,
    #[error("Account is disabled")]
    AccountDisabled,
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error("Invalid or expired reset token")]
    InvalidResetToken,
    #[error("Reset token has expired")]
    ResetTokenExpired,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Failed to send email: {0}")]
    EmailSendFailure(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AuthError {
    pub fn is_unexpected(&self) -> bool {
        matches!(self, AuthError::Unexpected(_))
    }
}

impl From<UserStoreError> for AuthError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::DuplicateUsername => AuthError::UsernameTaken,
            UserStoreError::DuplicateEmail => AuthError::EmailTaken,
            other => AuthError::Unexpected(other.to_string()),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(error: TokenError) -> Self {
        AuthError::Unexpected(error.to_string())
    }
}

impl From<HashError> for AuthError {
    fn from(error: HashError) -> Self {
        AuthError::Unexpected(error.to_string())
    }
}

impl From<NotificationError> for AuthError {
    fn from(error: NotificationError) -> Self {
        AuthError::EmailSendFailure(error.to_string())
    }
}
