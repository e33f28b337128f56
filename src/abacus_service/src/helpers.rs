use abacus_adapters::{
    Argon2PasswordHasher, ConfiguredNotificationGateway, JwtAuthConfig, JwtTokenService,
    PostgresUserStore,
    config::{AbacusSettings, PostgresSettings},
    email::{EmailComposer, GatewaySetupError},
};
use abacus_application::{AuthOrchestrator, PasswordResetPolicy};
use abacus_core::UserStore;
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use thiserror::Error;

/// The orchestrator wired with the production token service, hasher and
/// configured email gateway.
/// HS256 signing keys shorter than this are rejected at startup.
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

pub type AuthComponents<U> =
    AuthOrchestrator<U, JwtTokenService, Argon2PasswordHasher, ConfiguredNotificationGateway>;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Gateway(#[from] GatewaySetupError),
    #[error("Database setup failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid setting {0}")]
    InvalidSetting(&'static str),
}

/// Build the authentication orchestrator around `user_store` from settings.
pub fn auth_from_settings<U>(
    user_store: U,
    settings: &AbacusSettings,
) -> Result<AuthComponents<U>, SetupError>
where
    U: UserStore,
{
    let jwt = &settings.auth.jwt;
    let reset = &settings.auth.password_reset;

    if jwt.secret.expose_secret().len() < MIN_JWT_SECRET_LENGTH {
        return Err(SetupError::InvalidSetting("auth.jwt.secret"));
    }

    let token_service = JwtTokenService::new(JwtAuthConfig {
        jwt_secret: jwt.secret.clone(),
        access_token_ttl_in_seconds: jwt.access_token_ttl_in_seconds,
        refresh_token_ttl_in_seconds: jwt.refresh_token_ttl_in_seconds,
        password_reset_token_ttl_in_seconds: reset.token_ttl_in_seconds,
    });

    let composer = EmailComposer::new(settings.app.name.clone(), reset.token_ttl_in_seconds / 60);
    let notifier = ConfiguredNotificationGateway::from_settings(&settings.email_client, composer)?;

    let reset_ttl = chrono::Duration::try_seconds(reset.token_ttl_in_seconds)
        .ok_or(SetupError::InvalidSetting("auth.password_reset.token_ttl_in_seconds"))?;
    let reset_policy = PasswordResetPolicy::new(reset.url.clone(), reset_ttl);

    Ok(AuthOrchestrator::new(
        user_store,
        token_service,
        Argon2PasswordHasher,
        notifier,
        reset_policy,
    ))
}

/// Connect to PostgreSQL and apply pending migrations.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, SetupError> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret(), settings.max_connections).await?;

    PostgresUserStore::run_migrations(&pg_pool)
        .await
        .map_err(sqlx::Error::from)?;

    Ok(pg_pool)
}

pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}
