use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{email::Email, full_name::FullName, password::HashedPassword, username::Username};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserError {
    #[error("{0}")]
    InvalidUsername(String),
    #[error("{0}")]
    InvalidEmail(String),
    #[error("{0}")]
    InvalidPassword(String),
    #[error("{0}")]
    InvalidFullName(String),
    #[error("Unknown role: {0}")]
    InvalidRole(String),
}

impl UserError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            UserError::InvalidUsername(_) => "username",
            UserError::InvalidEmail(_) => "email",
            UserError::InvalidPassword(_) => "password",
            UserError::InvalidFullName(_) => "fullName",
            UserError::InvalidRole(_) => "role",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(UserError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user that has not been persisted yet. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub full_name: FullName,
    pub role: Role,
    pub enabled: bool,
}

impl NewUser {
    /// A regular, enabled account.
    pub fn new(
        username: Username,
        email: Email,
        password_hash: HashedPassword,
        full_name: FullName,
    ) -> Self {
        Self {
            username,
            email,
            password_hash,
            full_name,
            role: Role::User,
            enabled: true,
        }
    }
}

/// Flat view of every stored field, used by persistence adapters to move a
/// [`User`] in and out of their own row types.
#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub full_name: FullName,
    pub role: Role,
    pub enabled: bool,
    pub refresh_token: Option<String>,
    pub password_reset_token: Option<String>,
    pub password_reset_token_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password_hash: HashedPassword,
    full_name: FullName,
    role: Role,
    enabled: bool,
    refresh_token: Option<String>,
    password_reset_token: Option<String>,
    password_reset_token_expiry: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Materialize a freshly created record.
    pub fn create(id: UserId, new_user: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            full_name: new_user.full_name,
            role: new_user.role,
            enabled: new_user.enabled,
            refresh_token: None,
            password_reset_token: None,
            password_reset_token_expiry: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_parts(parts: UserParts) -> Self {
        Self {
            id: parts.id,
            username: parts.username,
            email: parts.email,
            password_hash: parts.password_hash,
            full_name: parts.full_name,
            role: parts.role,
            enabled: parts.enabled,
            refresh_token: parts.refresh_token,
            password_reset_token: parts.password_reset_token,
            password_reset_token_expiry: parts.password_reset_token_expiry,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }

    pub fn into_parts(self) -> UserParts {
        UserParts {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            full_name: self.full_name,
            role: self.role,
            enabled: self.enabled,
            refresh_token: self.refresh_token,
            password_reset_token: self.password_reset_token,
            password_reset_token_expiry: self.password_reset_token_expiry,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn password_reset_token(&self) -> Option<&str> {
        self.password_reset_token.as_deref()
    }

    pub fn password_reset_token_expiry(&self) -> Option<DateTime<Utc>> {
        self.password_reset_token_expiry
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True only for the most recently issued refresh token.
    pub fn refresh_token_matches(&self, candidate: &str) -> bool {
        self.refresh_token.as_deref() == Some(candidate)
    }

    /// True only for the most recently issued reset token.
    pub fn password_reset_token_matches(&self, candidate: &str) -> bool {
        self.password_reset_token.as_deref() == Some(candidate)
    }

    /// A missing expiry counts as expired.
    pub fn password_reset_token_expired(&self, now: DateTime<Utc>) -> bool {
        match self.password_reset_token_expiry {
            Some(expiry) => expiry < now,
            None => true,
        }
    }

    /// Replaces the outstanding refresh token, invalidating the previous one.
    pub fn rotate_refresh_token(&mut self, token: String, now: DateTime<Utc>) {
        self.refresh_token = Some(token);
        self.updated_at = now;
    }

    pub fn assign_password_reset_token(
        &mut self,
        token: String,
        expiry: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        self.password_reset_token = Some(token);
        self.password_reset_token_expiry = Some(expiry);
        self.updated_at = now;
    }

    /// Sets a new password hash and consumes any outstanding reset token.
    pub fn replace_password(&mut self, password_hash: HashedPassword, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.password_reset_token = None;
        self.password_reset_token_expiry = None;
        self.updated_at = now;
    }

    pub fn set_enabled(&mut self, enabled: bool, now: DateTime<Utc>) {
        self.enabled = enabled;
        self.updated_at = now;
    }
}
