//! Shared connection pool.
//!
//! One [`DbPool`] is built at startup and handed to whatever needs data
//! access; [`DbPool::close`] releases it at shutdown.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use appointments_shared::DatabaseConfig;
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, TransactionError,
    TransactionTrait,
};
use tracing::{debug, error, info};

use crate::session::Session;

/// Builds pool options from configuration.
///
/// Every acquire is preceded by a liveness check, so stale connections are
/// replaced transparently. SQL statement logging follows `config.echo`.
#[must_use]
pub fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.url());
    options
        .test_before_acquire(true)
        .sqlx_logging(config.echo);

    if let Some(max) = config.max_connections {
        options.max_connections(max);
    }
    if let Some(min) = config.min_connections {
        options.min_connections(min);
    }
    if let Some(secs) = config.connect_timeout_secs {
        options.connect_timeout(Duration::from_secs(secs));
    }
    options
}

/// Process-wide pool of connections to the appointments database.
#[derive(Debug, Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connects using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let url = config.redacted_url();
        match Self::connect_with(connect_options(config)).await {
            Ok(pool) => {
                info!(url = %url, echo = config.echo, "Connected to database");
                Ok(pool)
            }
            Err(e) => {
                error!(url = %url, error = %e, "Database connection failed");
                Err(e)
            }
        }
    }

    /// Connects using explicit pool options.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established.
    pub async fn connect_with(options: ConnectOptions) -> Result<Self, DbErr> {
        let conn = Database::connect(options).await?;
        Ok(Self { conn })
    }

    /// Returns the underlying connection for pool-level queries.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Checks that the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the ping fails.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }

    /// Opens a new scoped [`Session`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be opened.
    pub async fn session(&self) -> Result<Session, DbErr> {
        Session::begin(&self.conn).await
    }

    /// Runs one unit of work in its own session.
    ///
    /// Commits when `work` returns `Ok` and rolls back when it returns `Err`.
    /// A panic or a dropped future releases the session through rollback.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::Connection`] if the session cannot be
    /// opened or committed, and [`TransactionError::Transaction`] with the
    /// error returned by `work`.
    pub async fn with_session<F, T, E>(&self, work: F) -> Result<T, TransactionError<E>>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>
            + Send,
        T: Send,
        E: std::fmt::Display + std::fmt::Debug + Send,
    {
        let result = self.conn.transaction(work).await;
        debug!(committed = result.is_ok(), "Session finished");
        result
    }

    /// Closes every pooled connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be shut down cleanly.
    pub async fn close(self) -> Result<(), DbErr> {
        self.conn.close().await?;
        info!("Database pool closed");
        Ok(())
    }
}
