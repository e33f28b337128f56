use abacus_core::{Email, NotificationError, NotificationGateway, Username};
use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use super::composer::{EmailComposer, RenderedEmail};

const SEND_EMAIL_PATH: &str = "/v3/smtp/email";
const BREVO_AUTH_HEADER: &str = "api-key";

/// Sends transactional email through the Brevo HTTP API.
pub struct BrevoNotificationGateway {
    http_client: Client,
    base_url: String,
    sender: Email,
    sender_name: String,
    api_key: Secret<String>,
    composer: EmailComposer,
}

impl BrevoNotificationGateway {
    pub fn new(
        base_url: String,
        sender: Email,
        sender_name: String,
        api_key: Secret<String>,
        http_client: Client,
        composer: EmailComposer,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            sender_name,
            api_key,
            composer,
        }
    }

    #[tracing::instrument(name = "Sending email", skip_all, fields(subject = %email.subject))]
    async fn send(&self, recipient: &Email, email: RenderedEmail) -> Result<(), NotificationError> {
        let base = Url::parse(&self.base_url).map_err(delivery_error)?;
        let url = base.join(SEND_EMAIL_PATH).map_err(delivery_error)?;

        let request_body = SendEmailRequest {
            sender: Contact {
                email: self.sender.as_str(),
                name: Some(&self.sender_name),
            },
            to: vec![Contact {
                email: recipient.as_str(),
                name: None,
            }],
            subject: &email.subject,
            html_content: &email.html,
            text_content: &email.text,
        };

        self.http_client
            .post(url)
            .header(BREVO_AUTH_HEADER, self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(delivery_error)?
            .error_for_status()
            .map_err(delivery_error)?;

        Ok(())
    }
}

fn delivery_error(e: impl std::fmt::Display) -> NotificationError {
    NotificationError::Delivery(e.to_string())
}

#[async_trait]
impl NotificationGateway for BrevoNotificationGateway {
    async fn send_welcome_email(
        &self,
        recipient: &Email,
        username: &Username,
    ) -> Result<(), NotificationError> {
        let email = self.composer.welcome(username)?;
        self.send(recipient, email).await
    }

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        username: &Username,
        _reset_token: &str,
        reset_url: &str,
    ) -> Result<(), NotificationError> {
        let email = self.composer.password_reset(username, reset_url)?;
        self.send(recipient, email).await
    }
}

#[derive(Serialize, Debug)]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}
