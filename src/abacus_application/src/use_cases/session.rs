use abacus_core::{TokenService, User, UserStore};
use chrono::Utc;

use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Public view of a user. Never carries the hash or any stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            email: user.email().to_string(),
            full_name: user.full_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub tokens: TokenPair,
    pub profile: UserProfile,
    pub message: &'static str,
}

/// Issues a fresh token pair and persists the refresh token, which replaces
/// whatever the user held before.
pub(crate) async fn start_session<U, T>(
    user_store: &U,
    token_service: &T,
    mut user: User,
    message: &'static str,
) -> Result<AuthSession, AuthError>
where
    U: UserStore,
    T: TokenService,
{
    let access_token = token_service.issue_access_token(user.username())?;
    let refresh_token = token_service.issue_refresh_token(&user)?;

    user.rotate_refresh_token(refresh_token.clone(), Utc::now());
    user_store.save(&user).await?;

    Ok(AuthSession {
        tokens: TokenPair {
            access_token,
            refresh_token,
        },
        profile: UserProfile::from(&user),
        message,
    })
}
