//! Appointments data layer on `SeaORM`.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for `appointments`
//! - The schema migration creating the table, enum type and indexes
//! - An explicitly owned connection pool with scoped sessions
//! - A bootstrap that creates missing tables from the declared entities
//! - A thin repository for reading and writing appointments

pub mod bootstrap;
pub mod entities;
pub mod migration;
pub mod pool;
pub mod repositories;
pub mod schema;
pub mod session;

pub use bootstrap::create_db_and_tables;
pub use entities::sea_orm_active_enums::AppointmentStatus;
pub use pool::{DbPool, connect_options};
pub use repositories::{AppointmentError, AppointmentRepository, CreateAppointmentInput};
pub use session::{Session, SessionExt};

use appointments_shared::{AppError, AppResult, DatabaseConfig};
use sea_orm::ConnectOptions;

/// Establishes the shared connection pool from configuration.
///
/// # Errors
///
/// Returns [`AppError::Connection`] if the server cannot be reached.
pub async fn connect(config: &DatabaseConfig) -> AppResult<DbPool> {
    DbPool::connect(config)
        .await
        .map_err(|e| AppError::Connection(e.to_string()))
}

/// Establishes the shared connection pool from prepared options.
///
/// # Errors
///
/// Returns [`AppError::Connection`] if the server cannot be reached.
pub async fn connect_with(options: ConnectOptions) -> AppResult<DbPool> {
    DbPool::connect_with(options)
        .await
        .map_err(|e| AppError::Connection(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        let config = DatabaseConfig {
            host: "127.0.0.1".into(),
            port: 1,
            connect_timeout_secs: Some(1),
            ..DatabaseConfig::default()
        };

        let err = connect(&config).await.unwrap_err();
        assert_eq!(err.error_code(), "CONNECTION_ERROR");
    }
}
