//! Database migration runner for the appointments schema.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!   migrator refresh - Rollback all migrations, then re-apply them
//!   migrator reset   - Rollback all migrations
//!
//! Connection settings come from `POSTGRES_*` variables unless
//! `--database-url` (or `DATABASE_URL`) is given.

use appointments_db::{connect, connect_with, migration::Migrator};
use appointments_shared::DatabaseConfig;
use clap::{Parser, Subcommand};
use sea_orm_migration::{MigratorTrait, sea_orm::ConnectOptions};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "migrator")]
#[command(about = "Applies or rolls back the appointments schema", long_about = None)]
#[command(version)]
struct Cli {
    /// Full connection string, overriding the POSTGRES_* settings
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations (the default)
    Up {
        /// Number of pending migrations to apply
        #[arg(short, long)]
        num: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        /// Number of applied migrations to roll back
        #[arg(short, long, default_value_t = 1)]
        num: u32,
    },
    /// Show applied and pending migrations
    Status,
    /// Drop all tables, then apply all migrations
    Fresh,
    /// Roll back all migrations, then apply them again
    Refresh,
    /// Roll back all migrations
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appointments_db=info,sea_orm_migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let pool = match cli.database_url {
        Some(url) => {
            let mut options = ConnectOptions::new(url);
            options.test_before_acquire(true);
            connect_with(options).await?
        }
        None => connect(&DatabaseConfig::load()?).await?,
    };
    let db = pool.connection();

    match cli.command.unwrap_or(Command::Up { num: None }) {
        Command::Up { num } => Migrator::up(db, num).await?,
        Command::Down { num } => Migrator::down(db, Some(num)).await?,
        Command::Status => Migrator::status(db).await?,
        Command::Fresh => Migrator::fresh(db).await?,
        Command::Refresh => Migrator::refresh(db).await?,
        Command::Reset => Migrator::reset(db).await?,
    }
    info!("Migration command finished");

    pool.close().await?;
    Ok(())
}
