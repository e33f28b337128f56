use abacus_core::{Email, NotificationGateway, TokenService, UserStore};
use chrono::Utc;

use super::messages;
use crate::{error::AuthError, orchestrator::PasswordResetPolicy};

/// Forgot password use case - issues a reset token and mails the link
pub struct ForgotPasswordUseCase<'a, U, T, N>
where
    U: UserStore,
    T: TokenService,
    N: NotificationGateway,
{
    user_store: &'a U,
    token_service: &'a T,
    notifier: &'a N,
    policy: &'a PasswordResetPolicy,
}

impl<'a, U, T, N> ForgotPasswordUseCase<'a, U, T, N>
where
    U: UserStore,
    T: TokenService,
    N: NotificationGateway,
{
    pub fn new(
        user_store: &'a U,
        token_service: &'a T,
        notifier: &'a N,
        policy: &'a PasswordResetPolicy,
    ) -> Self {
        Self {
            user_store,
            token_service,
            notifier,
            policy,
        }
    }

    /// Always answers with the same message so callers cannot probe which
    /// emails are registered.
    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: &Email) -> Result<&'static str, AuthError> {
        let Some(mut user) = self.user_store.find_by_email(email.as_str()).await? else {
            tracing::info!("Password reset requested for unknown email");
            return Ok(messages::RESET_LINK_SENT);
        };
        if !user.is_enabled() {
            tracing::warn!("Password reset requested for disabled account");
            return Ok(messages::RESET_LINK_SENT);
        }

        let reset_token = self.token_service.issue_password_reset_token(user.email())?;
        let now = Utc::now();
        user.assign_password_reset_token(reset_token.clone(), now + self.policy.token_ttl, now);
        self.user_store.save(&user).await?;

        let reset_url = self.policy.reset_link(&reset_token);
        match self
            .notifier
            .send_password_reset_email(user.email(), user.username(), &reset_token, &reset_url)
            .await
        {
            Ok(()) => tracing::info!("Password reset email sent"),
            Err(e) => {
                let error = AuthError::from(e);
                tracing::error!(%error, "Password reset email not sent");
            }
        }

        Ok(messages::RESET_LINK_SENT)
    }
}
