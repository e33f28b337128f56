use std::time::Duration;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{defaults, env};

#[derive(Debug, Clone, Deserialize)]
pub struct AbacusSettings {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub postgres: Option<PostgresSettings>,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    pub password_reset: PasswordResetSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub access_token_ttl_in_seconds: i64,
    pub refresh_token_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetSettings {
    pub url: String,
    pub token_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    defaults::POSTGRES_MAX_CONNECTIONS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Logging,
    Brevo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub provider: EmailProvider,
    pub base_url: String,
    pub api_key: Option<Secret<String>>,
    pub sender_email: String,
    pub sender_name: String,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

impl AbacusSettings {
    /// Defaults, then `config/default.json` if present, then `ABACUS__*`
    /// environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = with_defaults(Config::builder())?
            .add_source(File::with_name(env::CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("app.allowed_origins")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Settings from a JSON document layered over the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        with_defaults(Config::builder())?
            .add_source(File::from_str(json, config::FileFormat::Json))
            .build()?
            .try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("app.name", defaults::APP_NAME)?
        .set_default("app.address", defaults::APP_ADDRESS)?
        .set_default("app.allowed_origins", Vec::<String>::new())?
        .set_default(
            "auth.jwt.access_token_ttl_in_seconds",
            defaults::ACCESS_TOKEN_TTL_IN_SECONDS,
        )?
        .set_default(
            "auth.jwt.refresh_token_ttl_in_seconds",
            defaults::REFRESH_TOKEN_TTL_IN_SECONDS,
        )?
        .set_default("auth.password_reset.url", defaults::PASSWORD_RESET_URL)?
        .set_default(
            "auth.password_reset.token_ttl_in_seconds",
            defaults::PASSWORD_RESET_TOKEN_TTL_IN_SECONDS,
        )?
        .set_default("email_client.provider", defaults::email_client::PROVIDER)?
        .set_default("email_client.base_url", defaults::email_client::BASE_URL)?
        .set_default(
            "email_client.sender_email",
            defaults::email_client::SENDER_EMAIL,
        )?
        .set_default("email_client.sender_name", defaults::email_client::SENDER_NAME)?
        .set_default(
            "email_client.timeout_in_millis",
            defaults::email_client::TIMEOUT_IN_MILLIS,
        )
}
