use abacus_core::{Email, NotificationError, NotificationGateway, Username};
use async_trait::async_trait;
use thiserror::Error;

use super::{
    brevo_notification_gateway::BrevoNotificationGateway, composer::EmailComposer,
    logging_notification_gateway::LoggingNotificationGateway,
};
use crate::config::{EmailClientSettings, EmailProvider};

#[derive(Debug, Error)]
pub enum GatewaySetupError {
    #[error("email_client.api_key is required for the brevo provider")]
    MissingApiKey,
    #[error("Invalid sender email: {0}")]
    InvalidSender(String),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// The gateway picked at startup from `email_client.provider`.
pub enum ConfiguredNotificationGateway {
    Logging(LoggingNotificationGateway),
    Brevo(BrevoNotificationGateway),
}

impl ConfiguredNotificationGateway {
    pub fn from_settings(
        settings: &EmailClientSettings,
        composer: EmailComposer,
    ) -> Result<Self, GatewaySetupError> {
        match settings.provider {
            EmailProvider::Logging => Ok(Self::Logging(LoggingNotificationGateway::new(composer))),
            EmailProvider::Brevo => {
                let api_key = settings
                    .api_key
                    .clone()
                    .ok_or(GatewaySetupError::MissingApiKey)?;
                let sender = Email::try_from(settings.sender_email.as_str())
                    .map_err(|e| GatewaySetupError::InvalidSender(e.to_string()))?;
                let http_client = reqwest::Client::builder()
                    .timeout(settings.timeout())
                    .build()?;

                Ok(Self::Brevo(BrevoNotificationGateway::new(
                    settings.base_url.clone(),
                    sender,
                    settings.sender_name.clone(),
                    api_key,
                    http_client,
                    composer,
                )))
            }
        }
    }
}

#[async_trait]
impl NotificationGateway for ConfiguredNotificationGateway {
    async fn send_welcome_email(
        &self,
        recipient: &Email,
        username: &Username,
    ) -> Result<(), NotificationError> {
        match self {
            Self::Logging(gateway) => gateway.send_welcome_email(recipient, username).await,
            Self::Brevo(gateway) => gateway.send_welcome_email(recipient, username).await,
        }
    }

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        username: &Username,
        reset_token: &str,
        reset_url: &str,
    ) -> Result<(), NotificationError> {
        match self {
            Self::Logging(gateway) => {
                gateway
                    .send_password_reset_email(recipient, username, reset_token, reset_url)
                    .await
            }
            Self::Brevo(gateway) => {
                gateway
                    .send_password_reset_email(recipient, username, reset_token, reset_url)
                    .await
            }
        }
    }
}
