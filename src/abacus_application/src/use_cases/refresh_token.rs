use abacus_core::{TokenService, UserStore};

use super::{
    messages,
    session::{AuthSession, start_session},
};
use crate::error::AuthError;

/// Refresh token use case - exchanges the current refresh token for a new pair
pub struct RefreshTokenUseCase<'a, U, T>
where
    U: UserStore,
    T: TokenService,
{
    user_store: &'a U,
    token_service: &'a T,
}

impl<'a, U, T> RefreshTokenUseCase<'a, U, T>
where
    U: UserStore,
    T: TokenService,
{
    pub fn new(user_store: &'a U, token_service: &'a T) -> Self {
        Self {
            user_store,
            token_service,
        }
    }

    /// Only the refresh token most recently issued to the user is accepted.
    #[tracing::instrument(name = "RefreshTokenUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let refresh_token = refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(AuthError::InvalidRefreshToken);
        }

        let username = self
            .token_service
            .extract_username(refresh_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Unreadable refresh token");
                AuthError::InvalidRefreshToken
            })?;

        let Some(user) = self.user_store.find_by_username(&username).await? else {
            tracing::warn!(%username, "Refresh token for unknown user");
            return Err(AuthError::InvalidRefreshToken);
        };

        if !user.refresh_token_matches(refresh_token) {
            tracing::warn!(%username, "Refresh token is not the current one");
            return Err(AuthError::InvalidRefreshToken);
        }
        if !self.token_service.is_valid(refresh_token, &user) {
            tracing::warn!(%username, "Refresh token failed validation");
            return Err(AuthError::InvalidRefreshToken);
        }
        if !user.is_enabled() {
            return Err(AuthError::AccountDisabled);
        }

        start_session(
            self.user_store,
            self.token_service,
            user,
            messages::TOKEN_REFRESHED,
        )
        .await
    }
}
