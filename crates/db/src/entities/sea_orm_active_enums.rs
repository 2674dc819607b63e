//! `SeaORM` active enums backed by PostgreSQL enumerated types.

use std::fmt;
use std::str::FromStr;

use appointments_shared::AppError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an appointment (`appointmentstatus`).
///
/// Declaration order matches the label order of the database type.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "appointmentstatus")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Booked and upcoming. Database default.
    #[default]
    #[sea_orm(string_value = "SCHEDULED")]
    Scheduled,
    /// The visit took place.
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Called off by either party.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    /// Awaiting confirmation.
    #[sea_orm(string_value = "PENDING")]
    Pending,
}

impl AppointmentStatus {
    /// All statuses in database label order.
    pub const ALL: [Self; 4] = [
        Self::Scheduled,
        Self::Completed,
        Self::Cancelled,
        Self::Pending,
    ];

    /// The database label for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Pending => "PENDING",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the `appointmentstatus` labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid appointment status '{0}'")]
pub struct InvalidStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

impl From<InvalidStatus> for AppError {
    fn from(err: InvalidStatus) -> Self {
        Self::Validation(err.to_string())
    }
}
