use abacus_core::{Password, PasswordHasher, TokenService, UserStore};
use chrono::Utc;
use secrecy::{ExposeSecret, Secret};

use super::{messages, session::UserProfile};
use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct ResetPasswordRequest {
    pub reset_token: String,
    pub new_password: Password,
    pub confirm_password: Secret<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetOutcome {
    pub profile: UserProfile,
    pub message: &'static str,
}

/// Reset password use case - consumes a reset token and sets a new password
pub struct ResetPasswordUseCase<'a, U, T, H>
where
    U: UserStore,
    T: TokenService,
    H: PasswordHasher,
{
    user_store: &'a U,
    token_service: &'a T,
    password_hasher: &'a H,
}

impl<'a, U, T, H> ResetPasswordUseCase<'a, U, T, H>
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

    /// A reset token is accepted once: the stored copy is cleared together
    /// with the password change.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<PasswordResetOutcome, AuthError> {
        if request.new_password.as_ref().expose_secret() != request.confirm_password.expose_secret()
        {
            return Err(AuthError::PasswordMismatch);
        }

        let reset_token = request.reset_token.trim();
        if !self.token_service.is_reset_token_valid(reset_token) {
            tracing::warn!("Reset token failed validation");
            return Err(AuthError::InvalidResetToken);
        }

        let email = self
            .token_service
            .extract_email(reset_token)
            .map_err(|_| AuthError::InvalidResetToken)?;
        let Some(mut user) = self.user_store.find_by_email(&email).await? else {
            tracing::warn!("Reset token for unknown email");
            return Err(AuthError::InvalidResetToken);
        };

        if !user.is_enabled() {
            return Err(AuthError::AccountDisabled);
        }
        if !user.password_reset_token_matches(reset_token) {
            tracing::warn!(username = %user.username(), "Reset token is not the current one");
            return Err(AuthError::InvalidResetToken);
        }
        if user.password_reset_token_expired(Utc::now()) {
            return Err(AuthError::ResetTokenExpired);
        }

        let password_hash = self.password_hasher.hash(request.new_password).await?;
        user.replace_password(password_hash, Utc::now());
        self.user_store.save(&user).await?;

        tracing::info!(username = %user.username(), "Password reset");
        Ok(PasswordResetOutcome {
            profile: UserProfile::from(&user),
            message: messages::PASSWORD_RESET,
        })
    }
}
