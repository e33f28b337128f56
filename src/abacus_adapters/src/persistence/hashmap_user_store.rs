use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use abacus_core::{NewUser, User, UserId, UserStore, UserStoreError};
use chrono::Utc;

/// In-process credential store. Every operation takes the map lock once, so
/// uniqueness checks and writes are atomic with respect to each other.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn check_unique<'a>(
    mut others: impl Iterator<Item = &'a User>,
    username: &str,
    email: &str,
) -> Result<(), UserStoreError> {
    others.try_for_each(|other| {
        if other.username().as_str() == username {
            Err(UserStoreError::DuplicateUsername)
        } else if other.email().as_str() == email {
            Err(UserStoreError::DuplicateEmail)
        } else {
            Ok(())
        }
    })
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        check_unique(users.values(), user.username.as_str(), user.email.as_str())?;

        let user = User::create(UserId::new(), user, Utc::now());
        users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id()) {
            return Err(UserStoreError::UserNotFound);
        }
        check_unique(
            users.values().filter(|other| other.id() != user.id()),
            user.username().as_str(),
            user.email().as_str(),
        )?;

        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.username().as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.email().as_str() == email)
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|user| user.username().as_str() == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().any(|user| user.email().as_str() == email))
    }
}
