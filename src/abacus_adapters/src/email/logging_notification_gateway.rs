use abacus_core::{Email, NotificationError, NotificationGateway, Username};
use async_trait::async_trait;

use super::composer::EmailComposer;

/// Development gateway: renders each email and writes it to the log instead
/// of sending it.
#[derive(Debug, Clone)]
pub struct LoggingNotificationGateway {
    composer: EmailComposer,
}

impl LoggingNotificationGateway {
    pub fn new(composer: EmailComposer) -> Self {
        Self { composer }
    }
}

#[async_trait]
impl NotificationGateway for LoggingNotificationGateway {
    #[tracing::instrument(name = "Logging welcome email", skip_all)]
    async fn send_welcome_email(
        &self,
        recipient: &Email,
        username: &Username,
    ) -> Result<(), NotificationError> {
        let email = self.composer.welcome(username)?;
        tracing::info!(
            to = %recipient,
            subject = %email.subject,
            body = %email.text,
            "Email not sent, logging only"
        );
        Ok(())
    }

    #[tracing::instrument(name = "Logging password reset email", skip_all)]
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        username: &Username,
        _reset_token: &str,
        reset_url: &str,
    ) -> Result<(), NotificationError> {
        let email = self.composer.password_reset(username, reset_url)?;
        tracing::info!(
            to = %recipient,
            subject = %email.subject,
            %reset_url,
            "Email not sent, logging only"
        );
        Ok(())
    }
}
