//! In-memory doubles for the ports, shared by the use case tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use abacus_core::{
    Email, FullName, HashError, HashedPassword, NewUser, NotificationError, NotificationGateway,
    Password, PasswordHasher, TokenError, TokenService, User, UserId, UserStore, UserStoreError,
    Username,
};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    writes: Arc<AtomicUsize>,
}

impl MockUserStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn get(&self, username: &str) -> User {
        self.find_by_username(username).await.unwrap().unwrap()
    }

    /// Overwrites a record without counting it as a write.
    pub async fn put(&self, user: User) {
        self.users.write().await.insert(user.id(), user);
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username() == &user.username) {
            return Err(UserStoreError::DuplicateUsername);
        }
        if users.values().any(|u| u.email() == &user.email) {
            return Err(UserStoreError::DuplicateEmail);
        }
        let user = User::create(UserId::new(), user, Utc::now());
        users.insert(user.id(), user.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id()) {
            return Err(UserStoreError::UserNotFound);
        }
        users.insert(user.id(), user.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username().as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email().as_str() == email).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, UserStoreError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserStoreError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

/// Tokens look like `kind|subject|serial`. Every issued token is unique.
#[derive(Clone, Default)]
pub struct FakeTokenService {
    serial: Arc<AtomicUsize>,
    expired: Arc<std::sync::RwLock<HashSet<String>>>,
}

impl FakeTokenService {
    pub fn expire(&self, token: &str) {
        self.expired.write().unwrap().insert(token.to_string());
    }

    fn issue(&self, kind: &str, subject: &str) -> String {
        let serial = self.serial.fetch_add(1, Ordering::SeqCst);
        format!("{kind}|{subject}|{serial}")
    }

    fn parse<'t>(&self, token: &'t str) -> Option<(&'t str, &'t str)> {
        let mut parts = token.split('|');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(subject), Some(_), None) => Some((kind, subject)),
            _ => None,
        }
    }

    fn is_expired(&self, token: &str) -> bool {
        self.expired.read().unwrap().contains(token)
    }
}

impl TokenService for FakeTokenService {
    fn issue_access_token(&self, username: &Username) -> Result<String, TokenError> {
        Ok(self.issue("access", username.as_str()))
    }

    fn issue_refresh_token(&self, user: &User) -> Result<String, TokenError> {
        Ok(self.issue("refresh", user.username().as_str()))
    }

    fn issue_password_reset_token(&self, email: &Email) -> Result<String, TokenError> {
        Ok(self.issue("reset", email.as_str()))
    }

    fn extract_username(&self, token: &str) -> Result<String, TokenError> {
        match self.parse(token) {
            Some(("access" | "refresh", subject)) => Ok(subject.to_string()),
            _ => Err(TokenError::InvalidToken),
        }
    }

    fn extract_email(&self, reset_token: &str) -> Result<String, TokenError> {
        match self.parse(reset_token) {
            Some(("reset", subject)) => Ok(subject.to_string()),
            _ => Err(TokenError::InvalidToken),
        }
    }

    fn is_valid(&self, token: &str, user: &User) -> bool {
        !self.is_expired(token)
            && self
                .extract_username(token)
                .is_ok_and(|subject| subject == user.username().as_str())
    }

    fn is_reset_token_valid(&self, token: &str) -> bool {
        !self.is_expired(token) && self.extract_email(token).is_ok()
    }
}

/// Prefixes the plaintext instead of hashing it.
#[derive(Clone, Default)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: Password) -> Result<HashedPassword, HashError> {
        Ok(HashedPassword::new(Secret::from(format!(
            "plain:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn matches(
        &self,
        candidate: Secret<String>,
        expected: HashedPassword,
    ) -> Result<bool, HashError> {
        Ok(expected.as_ref().expose_secret() == &format!("plain:{}", candidate.expose_secret()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentEmail {
    Welcome { to: String },
    PasswordReset { to: String, token: String, url: String },
}

#[derive(Clone, Default)]
pub struct FakeNotifier {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    failing: bool,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl NotificationGateway for FakeNotifier {
    async fn send_welcome_email(
        &self,
        recipient: &Email,
        _username: &Username,
    ) -> Result<(), NotificationError> {
        if self.failing {
            return Err(NotificationError::Delivery("provider unavailable".into()));
        }
        self.sent.write().await.push(SentEmail::Welcome {
            to: recipient.to_string(),
        });
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        _username: &Username,
        reset_token: &str,
        reset_url: &str,
    ) -> Result<(), NotificationError> {
        if self.failing {
            return Err(NotificationError::Delivery("provider unavailable".into()));
        }
        self.sent.write().await.push(SentEmail::PasswordReset {
            to: recipient.to_string(),
            token: reset_token.to_string(),
            url: reset_url.to_string(),
        });
        Ok(())
    }
}

pub fn secret(value: &str) -> Secret<String> {
    Secret::from(value.to_string())
}

/// Stores an enabled user whose password is `password`.
pub async fn seed_user(store: &MockUserStore, username: &str, email: &str, password: &str) -> User {
    let hash = PlainPasswordHasher
        .hash(Password::try_from(secret(password)).unwrap())
        .await
        .unwrap();
    let user = User::create(
        UserId::new(),
        NewUser::new(
            Username::try_from(username).unwrap(),
            Email::try_from(email).unwrap(),
            hash,
            FullName::try_from("Test User").unwrap(),
        ),
        Utc::now(),
    );
    store.put(user.clone()).await;
    user
}

pub async fn disable(store: &MockUserStore, username: &str) {
    let mut user = store.get(username).await;
    user.set_enabled(false, Utc::now());
    store.put(user).await;
}
