//! DDL shared by the migration and the table bootstrap.
//!
//! The `appointmentstatus` type has no `CREATE TYPE IF NOT EXISTS` in
//! PostgreSQL, so creation is a check-then-create guarded by a
//! transaction-scoped advisory lock. Removal is best effort: the type is
//! kept while any column still uses it.

use sea_orm::{ConnectionTrait, DbErr, Statement};
use tracing::{debug, info, warn};

/// Name of the PostgreSQL enumerated type backing `AppointmentStatus`.
pub const STATUS_TYPE: &str = "appointmentstatus";

/// Name of the appointments table.
pub const APPOINTMENTS_TABLE: &str = "appointments";

/// Lookup indexes on the appointments table, as `(name, column, unique)`.
pub const APPOINTMENT_INDEXES: [(&str, &str, bool); 4] = [
    ("ix_appointments_appointment_id", "appointment_id", true),
    ("ix_appointments_doctor_id", "doctor_id", false),
    ("ix_appointments_facility_id", "facility_id", false),
    ("ix_appointments_patient_id", "patient_id", false),
];

/// Outcome of [`drop_status_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTypeCleanup {
    /// The type no longer exists.
    Dropped,
    /// The type is still referenced and was left in place.
    KeptInUse,
}

// Held until the surrounding transaction ends; released at statement end
// when run in autocommit mode.
const LOCK_SQL: &str = "SELECT pg_advisory_xact_lock(hashtext('appointmentstatus'))";

const STATUS_TYPE_EXISTS_SQL: &str = r"
SELECT EXISTS (
    SELECT 1
    FROM pg_type t
    JOIN pg_namespace n ON n.oid = t.typnamespace
    WHERE t.typname = 'appointmentstatus'
      AND n.nspname = current_schema()
) AS present
";

const STATUS_TYPE_IN_USE_SQL: &str = r"
SELECT EXISTS (
    SELECT 1
    FROM pg_attribute a
    JOIN pg_type t ON t.oid = a.atttypid
    JOIN pg_namespace n ON n.oid = t.typnamespace
    WHERE t.typname = 'appointmentstatus'
      AND n.nspname = current_schema()
      AND a.attnum > 0
      AND NOT a.attisdropped
) AS present
";

const CREATE_STATUS_TYPE_SQL: &str = r"
CREATE TYPE appointmentstatus AS ENUM (
    'SCHEDULED',
    'COMPLETED',
    'CANCELLED',
    'PENDING'
);
";

// Only dependent_objects_still_exist (2BP01) is trapped; anything else
// aborts the caller.
const DROP_STATUS_TYPE_SQL: &str = r"
DO $$
BEGIN
    EXECUTE format('DROP TYPE IF EXISTS %I.appointmentstatus', current_schema());
EXCEPTION
    WHEN dependent_objects_still_exist THEN
        RAISE NOTICE 'appointmentstatus is still referenced, keeping it';
END
$$;
";

/// Builds the `CREATE INDEX` statements for the lookup indexes.
pub(crate) fn create_indexes_sql(if_not_exists: bool) -> String {
    let guard = if if_not_exists { "IF NOT EXISTS " } else { "" };
    APPOINTMENT_INDEXES
        .iter()
        .map(|(name, column, unique)| {
            let unique = if *unique { "UNIQUE " } else { "" };
            format!("CREATE {unique}INDEX {guard}{name} ON {APPOINTMENTS_TABLE} ({column});\n")
        })
        .collect()
}

/// Builds the `DROP INDEX` statements for the lookup indexes.
pub(crate) fn drop_indexes_sql() -> String {
    APPOINTMENT_INDEXES
        .iter()
        .rev()
        .map(|(name, _, _)| format!("DROP INDEX {name};\n"))
        .collect()
}

async fn query_flag<C: ConnectionTrait>(db: &C, sql: &str) -> Result<bool, DbErr> {
    let row = db
        .query_one(Statement::from_string(db.get_database_backend(), sql))
        .await?
        .ok_or_else(|| DbErr::Custom("EXISTS query returned no row".to_string()))?;
    row.try_get::<bool>("", "present")
}

/// Returns whether `appointmentstatus` exists in the current schema.
///
/// # Errors
///
/// Returns an error if the catalog query fails.
pub async fn status_type_exists<C: ConnectionTrait>(db: &C) -> Result<bool, DbErr> {
    query_flag(db, STATUS_TYPE_EXISTS_SQL).await
}

/// Returns whether any column in the current schema still uses `appointmentstatus`.
///
/// # Errors
///
/// Returns an error if the catalog query fails.
pub async fn status_type_in_use<C: ConnectionTrait>(db: &C) -> Result<bool, DbErr> {
    query_flag(db, STATUS_TYPE_IN_USE_SQL).await
}

/// Creates `appointmentstatus` unless it already exists.
///
/// Returns `true` when the type was created by this call. Run it inside a
/// transaction so the advisory lock covers both the check and the create.
///
/// # Errors
///
/// Returns an error if locking, the catalog query or `CREATE TYPE` fails.
pub async fn ensure_status_type<C: ConnectionTrait>(db: &C) -> Result<bool, DbErr> {
    db.execute_unprepared(LOCK_SQL).await?;

    if status_type_exists(db).await? {
        debug!(type_name = STATUS_TYPE, "Enum type already present, skipping creation");
        return Ok(false);
    }

    db.execute_unprepared(CREATE_STATUS_TYPE_SQL).await?;
    info!(type_name = STATUS_TYPE, "Created enum type");
    Ok(true)
}

/// Drops `appointmentstatus` unless another column still references it.
///
/// # Errors
///
/// Returns an error for any failure other than the type being in use.
pub async fn drop_status_type<C: ConnectionTrait>(db: &C) -> Result<StatusTypeCleanup, DbErr> {
    if status_type_in_use(db).await? {
        warn!(type_name = STATUS_TYPE, "Enum type still referenced, leaving it in place");
        return Ok(StatusTypeCleanup::KeptInUse);
    }

    db.execute_unprepared(DROP_STATUS_TYPE_SQL).await?;

    if status_type_exists(db).await? {
        warn!(type_name = STATUS_TYPE, "Enum type has dependents, leaving it in place");
        Ok(StatusTypeCleanup::KeptInUse)
    } else {
        info!(type_name = STATUS_TYPE, "Dropped enum type");
        Ok(StatusTypeCleanup::Dropped)
    }
}
