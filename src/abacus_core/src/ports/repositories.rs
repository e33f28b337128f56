use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{NewUser, User};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User not found")]
    UserNotFound,
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserNotFound, Self::UserNotFound)
                | (Self::DuplicateUsername, Self::DuplicateUsername)
                | (Self::DuplicateEmail, Self::DuplicateEmail)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Credential store. Username and email are unique across all records; every
/// write replaces a single record atomically.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user and return it with its store-assigned id.
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError>;

    /// Overwrite an existing user record.
    async fn save(&self, user: &User) -> Result<(), UserStoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, UserStoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserStoreError>;

    /// Username lookup first, then email.
    async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> Result<Option<User>, UserStoreError> {
        match self.find_by_username(username_or_email).await? {
            Some(user) => Ok(Some(user)),
            None => self.find_by_email(username_or_email).await,
        }
    }
}
