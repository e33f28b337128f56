use abacus_adapters::{HashMapUserStore, PostgresUserStore, config::AbacusSettings};
use abacus_core::UserStore;
use abacus_service::{AbacusService, auth_from_settings, configure_postgresql};
use color_eyre::eyre::Result;
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    init_tracing()?;

    let settings = AbacusSettings::load()?;

    match &settings.postgres {
        Some(postgres) => {
            let pg_pool = configure_postgresql(postgres).await?;
            tracing::info!("Using PostgreSQL user store");
            serve(PostgresUserStore::new(pg_pool), &settings).await
        }
        None => {
            tracing::warn!("No postgres settings found, users are kept in memory");
            serve(HashMapUserStore::new(), &settings).await
        }
    }
}

async fn serve<U>(user_store: U, settings: &AbacusSettings) -> Result<()>
where
    U: UserStore + 'static,
{
    let auth = auth_from_settings(user_store, settings)?;

    let listener = TcpListener::bind(&settings.app.address).await?;
    tracing::info!("Starting {}...", settings.app.name);

    AbacusService::new(auth)
        .run_standalone(listener, &settings.app.allowed_origins)
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
