use abacus_core::{NotificationError, Username};
use askama::Template;

pub const WELCOME_SUBJECT_PREFIX: &str = "Welcome to";
pub const PASSWORD_RESET_SUBJECT: &str = "Password Reset Request";

#[derive(Template)]
#[template(path = "welcome.html")]
struct WelcomeHtml<'a> {
    app_name: &'a str,
    username: &'a str,
}

#[derive(Template)]
#[template(path = "welcome.txt")]
struct WelcomeText<'a> {
    app_name: &'a str,
    username: &'a str,
}

#[derive(Template)]
#[template(path = "password_reset.html")]
struct PasswordResetHtml<'a> {
    app_name: &'a str,
    username: &'a str,
    reset_url: &'a str,
    expires_in_minutes: i64,
}

#[derive(Template)]
#[template(path = "password_reset.txt")]
struct PasswordResetText<'a> {
    app_name: &'a str,
    username: &'a str,
    reset_url: &'a str,
    expires_in_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders the transactional emails from the templates bundled with the crate.
#[derive(Debug, Clone)]
pub struct EmailComposer {
    app_name: String,
    reset_link_ttl_in_minutes: i64,
}

impl EmailComposer {
    pub fn new(app_name: impl Into<String>, reset_link_ttl_in_minutes: i64) -> Self {
        Self {
            app_name: app_name.into(),
            reset_link_ttl_in_minutes,
        }
    }

    pub fn welcome(&self, username: &Username) -> Result<RenderedEmail, NotificationError> {
        let html = WelcomeHtml {
            app_name: &self.app_name,
            username: username.as_str(),
        };
        let text = WelcomeText {
            app_name: &self.app_name,
            username: username.as_str(),
        };

        Ok(RenderedEmail {
            subject: format!("{WELCOME_SUBJECT_PREFIX} {}!", self.app_name),
            html: html.render().map_err(rendering_error)?,
            text: text.render().map_err(rendering_error)?,
        })
    }

    pub fn password_reset(
        &self,
        username: &Username,
        reset_url: &str,
    ) -> Result<RenderedEmail, NotificationError> {
        let html = PasswordResetHtml {
            app_name: &self.app_name,
            username: username.as_str(),
            reset_url,
            expires_in_minutes: self.reset_link_ttl_in_minutes,
        };
        let text = PasswordResetText {
            app_name: &self.app_name,
            username: username.as_str(),
            reset_url,
            expires_in_minutes: self.reset_link_ttl_in_minutes,
        };

        Ok(RenderedEmail {
            subject: PASSWORD_RESET_SUBJECT.to_string(),
            html: html.render().map_err(rendering_error)?,
            text: text.render().map_err(rendering_error)?,
        })
    }
}

fn rendering_error(e: askama::Error) -> NotificationError {
    NotificationError::Rendering(e.to_string())
}
