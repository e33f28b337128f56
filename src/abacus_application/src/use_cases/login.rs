use abacus_core::{PasswordHasher, TokenService, UserStore};
use secrecy::Secret;

use super::{
    messages,
    session::{AuthSession, start_session},
};
use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Matched against usernames first, then emails.
    pub username_or_email: String,
    pub password: Secret<String>,
}

/// Login use case - verifies credentials and starts a new session
pub struct LoginUseCase<'a, U, T, H>
where
    U: UserStore,
    T: TokenService,
    H: PasswordHasher,
{
    user_store: &'a U,
    token_service: &'a T,
    password_hasher: &'a H,
}

impl<'a, U, T, H> LoginUseCase<'a, U, T, H>
where
    U: UserStore,
    T: TokenService,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, token_service: &'a T, password_hasher: &'a H) -> Self {
        Self {
            user_store,
            token_service,
            password_hasher,
        }
    }

    /// Unknown identifiers and wrong passwords fail with the same error.
    #[tracing::instrument(
        name = "LoginUseCase::execute",
        skip(self, request),
        fields(identifier = %request.username_or_email)
    )]
    pub async fn execute(&self, request: LoginRequest) -> Result<AuthSession, AuthError> {
        let Some(user) = self
            .user_store
            .find_by_username_or_email(request.username_or_email.trim())
            .await?
        else {
            tracing::warn!("Unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_enabled() {
            tracing::warn!("Login attempt on disabled account");
            return Err(AuthError::AccountDisabled);
        }

        let password_matches = self
            .password_hasher
            .matches(request.password, user.password_hash().clone())
            .await?;
        if !password_matches {
            tracing::warn!("Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = start_session(
            self.user_store,
            self.token_service,
            user,
            messages::LOGIN_SUCCESSFUL,
        )
        .await?;

        tracing::info!("User logged in");
        Ok(session)
    }
}
