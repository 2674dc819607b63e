//! Initial migration: `appointments` table and `appointmentstatus` enum.
//!
//! Revision `11a79f2c969c`, no parent revision.

use sea_orm_migration::prelude::*;
use tracing::{info, warn};

use super::INITIAL_REVISION;
use crate::schema::{self, StatusTypeCleanup};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUM (guarded, may already be provisioned)
        // ============================================================
        schema::ensure_status_type(db).await?;

        // ============================================================
        // PART 2: TABLE
        // ============================================================
        db.execute_unprepared(APPOINTMENTS_SQL).await?;

        // ============================================================
        // PART 3: INDEXES
        // ============================================================
        db.execute_unprepared(&schema::create_indexes_sql(false))
            .await?;

        info!(
            revision = INITIAL_REVISION,
            table = schema::APPOINTMENTS_TABLE,
            "Created appointments schema"
        );
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(&schema::drop_indexes_sql()).await?;
        db.execute_unprepared("DROP TABLE appointments;").await?;

        if schema::drop_status_type(db).await? == StatusTypeCleanup::KeptInUse {
            warn!(
                revision = INITIAL_REVISION,
                type_name = schema::STATUS_TYPE,
                "Rolled back appointments schema, enum type kept"
            );
        } else {
            info!(
                revision = INITIAL_REVISION,
                table = schema::APPOINTMENTS_TABLE,
                "Rolled back appointments schema"
            );
        }
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const APPOINTMENTS_SQL: &str = r"
CREATE TABLE appointments (
    id SERIAL NOT NULL,
    appointment_id VARCHAR NOT NULL,
    doctor_id VARCHAR NOT NULL,
    patient_id VARCHAR NOT NULL,
    facility_id VARCHAR NOT NULL,
    doctor_name VARCHAR NOT NULL,
    patient_name VARCHAR NOT NULL,
    appointment_date DATE NOT NULL,
    appointment_start_time TIME WITHOUT TIME ZONE NOT NULL,
    appointment_end_time TIME WITHOUT TIME ZONE NOT NULL,
    purpose_of_visit VARCHAR NOT NULL,
    description VARCHAR,
    status appointmentstatus NOT NULL DEFAULT 'SCHEDULED',
    created_at TIMESTAMP WITHOUT TIME ZONE NOT NULL DEFAULT now(),
    updated_at TIMESTAMP WITHOUT TIME ZONE,
    PRIMARY KEY (id),
    UNIQUE (appointment_id)
);
";
