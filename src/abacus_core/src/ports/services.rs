use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{HashedPassword, Password},
    user::User,
    username::Username,
};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Failed to render email: {0}")]
    Rendering(String),
    #[error("Email delivery failed: {0}")]
    Delivery(String),
}

/// Port trait for transactional email
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send_welcome_email(
        &self,
        recipient: &Email,
        username: &Username,
    ) -> Result<(), NotificationError>;

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        username: &Username,
        reset_token: &str,
        reset_url: &str,
    ) -> Result<(), NotificationError>;
}

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct HashError(pub String);

/// Port trait for one-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<HashedPassword, HashError>;

    /// `Ok(false)` for a wrong password, `Err` only when the stored hash is unusable.
    async fn matches(
        &self,
        candidate: Secret<String>,
        expected: HashedPassword,
    ) -> Result<bool, HashError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Issues and checks signed, expiring tokens. Holds no state besides its key
/// material; persisting the current token is the caller's job.
pub trait TokenService: Send + Sync {
    fn issue_access_token(&self, username: &Username) -> Result<String, TokenError>;

    fn issue_refresh_token(&self, user: &User) -> Result<String, TokenError>;

    fn issue_password_reset_token(&self, email: &Email) -> Result<String, TokenError>;

    /// Subject of an access or refresh token.
    fn extract_username(&self, token: &str) -> Result<String, TokenError>;

    /// Subject of a password reset token.
    fn extract_email(&self, reset_token: &str) -> Result<String, TokenError>;

    /// Signature and expiry hold and the token belongs to `user`.
    fn is_valid(&self, token: &str, user: &User) -> bool;

    fn is_reset_token_valid(&self, token: &str) -> bool;
}
