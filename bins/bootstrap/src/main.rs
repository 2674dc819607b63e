//! Creates any missing appointments tables from the declared entities.
//!
//! For first runs and local development; deployments use `migrator`.
//!
//! Usage: cargo run --bin bootstrap

use appointments_db::{connect, create_db_and_tables};
use appointments_shared::DatabaseConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appointments_db=debug,sea_orm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DatabaseConfig::load()?;
    info!(config = ?config, "Loaded database configuration");

    let pool = connect(&config).await?;
    pool.ping().await?;

    create_db_and_tables(pool.connection()).await?;

    pool.close().await?;
    info!("Bootstrap complete");
    Ok(())
}
