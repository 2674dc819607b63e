//! Shared helpers for database integration tests.
//!
//! Each test gets a fresh schema selected through `search_path`, so tests
//! can run in parallel against one database. Tests are skipped when
//! `DATABASE_URL` is not set.

#![allow(dead_code)]

use appointments_db::{CreateAppointmentInput, DbPool};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use uuid::Uuid;

/// A pool scoped to a throwaway schema.
pub struct TestDb {
    pub pool: DbPool,
    pub schema: String,
    admin: DatabaseConnection,
}

/// Connects to `DATABASE_URL` and creates an isolated schema.
pub async fn test_db() -> Option<TestDb> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return None;
    };

    let admin = Database::connect(&url)
        .await
        .expect("Failed to connect to database");
    let schema = format!("appt_test_{}", Uuid::new_v4().simple());
    admin
        .execute_unprepared(&format!(r#"CREATE SCHEMA "{schema}""#))
        .await
        .expect("Failed to create test schema");

    let mut options = ConnectOptions::new(url);
    options
        .set_schema_search_path(schema.clone())
        .max_connections(4)
        .test_before_acquire(true)
        .sqlx_logging(false);
    let pool = DbPool::connect_with(options)
        .await
        .expect("Failed to connect test pool");

    Some(TestDb {
        pool,
        schema,
        admin,
    })
}

impl TestDb {
    /// Closes the pool and drops the schema with everything in it.
    pub async fn teardown(self) {
        self.pool.close().await.ok();
        self.admin
            .execute_unprepared(&format!(r#"DROP SCHEMA "{}" CASCADE"#, self.schema))
            .await
            .ok();
    }
}

/// A valid appointment with the given identifier and no explicit status.
pub fn appointment_input(appointment_id: &str) -> CreateAppointmentInput {
    CreateAppointmentInput {
        appointment_id: appointment_id.to_string(),
        doctor_id: "DOC-1".to_string(),
        patient_id: "PAT-1".to_string(),
        facility_id: "FAC-1".to_string(),
        doctor_name: "Dr. Rivera".to_string(),
        patient_name: "Sam Lee".to_string(),
        appointment_date: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        purpose_of_visit: "Annual checkup".to_string(),
        description: None,
        status: None,
    }
}

/// Inserts a row with raw SQL, letting `status` take the column default.
pub const INSERT_WITHOUT_STATUS_SQL: &str = r"
INSERT INTO appointments (
    appointment_id, doctor_id, patient_id, facility_id, doctor_name, patient_name,
    appointment_date, appointment_start_time, appointment_end_time, purpose_of_visit
) VALUES (
    'RAW-1', 'DOC-1', 'PAT-1', 'FAC-1', 'Dr. Rivera', 'Sam Lee',
    DATE '2025-09-22', TIME '09:00', TIME '09:30', 'Annual checkup'
)
";

/// Inserts a row with a status label outside `appointmentstatus`.
pub const INSERT_UNKNOWN_STATUS_SQL: &str = r"
INSERT INTO appointments (
    appointment_id, doctor_id, patient_id, facility_id, doctor_name, patient_name,
    appointment_date, appointment_start_time, appointment_end_time, purpose_of_visit, status
) VALUES (
    'RAW-2', 'DOC-1', 'PAT-1', 'FAC-1', 'Dr. Rivera', 'Sam Lee',
    DATE '2025-09-22', TIME '10:00', TIME '10:30', 'Follow-up', 'ARCHIVED'
)
";

/// Counts rows in `appointments`.
pub async fn count_appointments<C: ConnectionTrait>(db: &C) -> i64 {
    let row = db
        .query_one(sea_orm::Statement::from_string(
            db.get_database_backend(),
            "SELECT COUNT(*) AS n FROM appointments",
        ))
        .await
        .expect("Count query failed")
        .expect("Count returned no row");
    row.try_get::<i64>("", "n").expect("Count column missing")
}
