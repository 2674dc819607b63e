//! Scoped transactional sessions.
//!
//! A [`Session`] owns one pooled connection inside an open transaction for a
//! single unit of work. The transaction ends on every exit path:
//!
//! - [`Session::commit`] persists the work,
//! - [`Session::rollback`] discards it,
//! - dropping an unfinished session (early return, `?`, panic, or a
//!   cancelled future) rolls it back and returns the connection to the pool.
//!
//! # Usage
//!
//! ```ignore
//! use appointments_db::session::SessionExt;
//!
//! let session = db.session().await?;
//! let repo = AppointmentRepository::new(session.transaction());
//! repo.update_status("APT-1", AppointmentStatus::Completed).await?;
//! session.commit().await?;
//! ```

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::debug;

/// A transactional handle bound to the shared pool.
pub struct Session {
    txn: DatabaseTransaction,
}

impl Session {
    /// Opens a new session on `db`.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired or the transaction
    /// cannot be started.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        debug!("Session opened");
        Ok(Self { txn })
    }

    /// Returns the underlying transaction for executing queries.
    #[must_use]
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commits the session, persisting all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await?;
        debug!("Session committed");
        Ok(())
    }

    /// Rolls back the session, discarding all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await?;
        debug!("Session rolled back");
        Ok(())
    }
}

/// Extension trait for `DatabaseConnection` to open scoped sessions.
#[async_trait::async_trait]
pub trait SessionExt {
    /// Opens a new [`Session`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be opened.
    async fn session(&self) -> Result<Session, DbErr>;
}

#[async_trait::async_trait]
impl SessionExt for DatabaseConnection {
    async fn session(&self) -> Result<Session, DbErr> {
        Session::begin(self).await
    }
}
