//! Appointment repository for database operations.
//!
//! Plain data access only: no overlap detection and no status transition
//! rules. Works on the pool or inside a [`Session`](crate::session::Session).

use appointments_shared::AppError;
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::entities::{appointments, sea_orm_active_enums::AppointmentStatus};

/// Error types for appointment operations.
#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    /// Another appointment already uses this identifier.
    #[error("Appointment '{0}' already exists")]
    DuplicateAppointmentId(String),

    /// No appointment with this identifier.
    #[error("Appointment not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::DuplicateAppointmentId(_) => Self::Conflict(err.to_string()),
            AppointmentError::NotFound(id) => Self::NotFound(format!("appointment {id}")),
            AppointmentError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an appointment.
#[derive(Debug, Clone)]
pub struct CreateAppointmentInput {
    /// External-facing identifier, unique across all appointments.
    pub appointment_id: String,
    /// Doctor identifier.
    pub doctor_id: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Facility identifier.
    pub facility_id: String,
    /// Doctor display name.
    pub doctor_name: String,
    /// Patient display name.
    pub patient_name: String,
    /// Calendar date of the visit.
    pub appointment_date: NaiveDate,
    /// Start time of the visit.
    pub start_time: NaiveTime,
    /// End time of the visit.
    pub end_time: NaiveTime,
    /// Reason for the visit.
    pub purpose_of_visit: String,
    /// Free-form notes.
    pub description: Option<String>,
    /// Initial status; the database default (`SCHEDULED`) when `None`.
    pub status: Option<AppointmentStatus>,
}

/// Appointment repository for CRUD operations.
#[derive(Debug, Clone, Copy)]
pub struct AppointmentRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AppointmentRepository<'a, C> {
    /// Creates a repository over a pool connection or a session transaction.
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new appointment.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAppointmentId` if the identifier is taken, or a
    /// database error if the insert fails.
    pub async fn create(
        &self,
        input: CreateAppointmentInput,
    ) -> Result<appointments::Model, AppointmentError> {
        let appointment_id = input.appointment_id.clone();

        let appointment = appointments::ActiveModel {
            id: NotSet,
            appointment_id: Set(input.appointment_id),
            doctor_id: Set(input.doctor_id),
            patient_id: Set(input.patient_id),
            facility_id: Set(input.facility_id),
            doctor_name: Set(input.doctor_name),
            patient_name: Set(input.patient_name),
            appointment_date: Set(input.appointment_date),
            appointment_start_time: Set(input.start_time),
            appointment_end_time: Set(input.end_time),
            purpose_of_visit: Set(input.purpose_of_visit),
            description: Set(input.description),
            status: input.status.map_or(NotSet, Set),
            created_at: NotSet,
            updated_at: Set(None),
        };

        appointment.insert(self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppointmentError::DuplicateAppointmentId(appointment_id)
            } else {
                AppointmentError::Database(e)
            }
        })
    }

    /// Finds an appointment by its internal ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<appointments::Model>, AppointmentError> {
        Ok(appointments::Entity::find_by_id(id).one(self.db).await?)
    }

    /// Finds an appointment by its external identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_appointment_id(
        &self,
        appointment_id: &str,
    ) -> Result<Option<appointments::Model>, AppointmentError> {
        Ok(appointments::Entity::find()
            .filter(appointments::Column::AppointmentId.eq(appointment_id))
            .one(self.db)
            .await?)
    }

    /// Lists a doctor's appointments in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_doctor(
        &self,
        doctor_id: &str,
    ) -> Result<Vec<appointments::Model>, AppointmentError> {
        self.list_where(appointments::Column::DoctorId, doctor_id)
            .await
    }

    /// Lists a patient's appointments in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<appointments::Model>, AppointmentError> {
        self.list_where(appointments::Column::PatientId, patient_id)
            .await
    }

    /// Lists a facility's appointments in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_facility(
        &self,
        facility_id: &str,
    ) -> Result<Vec<appointments::Model>, AppointmentError> {
        self.list_where(appointments::Column::FacilityId, facility_id)
            .await
    }

    async fn list_where(
        &self,
        column: appointments::Column,
        value: &str,
    ) -> Result<Vec<appointments::Model>, AppointmentError> {
        Ok(appointments::Entity::find()
            .filter(column.eq(value))
            .order_by_asc(appointments::Column::AppointmentDate)
            .order_by_asc(appointments::Column::AppointmentStartTime)
            .order_by_asc(appointments::Column::Id)
            .all(self.db)
            .await?)
    }

    /// Sets the status of an appointment and stamps `updated_at`.
    ///
    /// Any status may replace any other.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown identifier, or a database error.
    pub async fn update_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<appointments::Model, AppointmentError> {
        let mut appointment = self.load_for_update(appointment_id).await?;
        appointment.status = Set(status);
        self.save(appointment).await
    }

    /// Replaces the description of an appointment and stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown identifier, or a database error.
    pub async fn update_description(
        &self,
        appointment_id: &str,
        description: Option<String>,
    ) -> Result<appointments::Model, AppointmentError> {
        let mut appointment = self.load_for_update(appointment_id).await?;
        appointment.description = Set(description);
        self.save(appointment).await
    }

    async fn load_for_update(
        &self,
        appointment_id: &str,
    ) -> Result<appointments::ActiveModel, AppointmentError> {
        self.find_by_appointment_id(appointment_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))
    }

    async fn save(
        &self,
        mut appointment: appointments::ActiveModel,
    ) -> Result<appointments::Model, AppointmentError> {
        appointment.updated_at = Set(Some(Utc::now().naive_utc()));
        Ok(appointment.update(self.db).await?)
    }

    /// Deletes an appointment.
    ///
    /// Returns `false` if no appointment had this identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, appointment_id: &str) -> Result<bool, AppointmentError> {
        let result = appointments::Entity::delete_many()
            .filter(appointments::Column::AppointmentId.eq(appointment_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_map_to_app_errors() {
        let dup: AppError = AppointmentError::DuplicateAppointmentId("APT-1".into()).into();
        assert!(matches!(dup, AppError::Conflict(ref msg) if msg.contains("APT-1")));

        let missing: AppError = AppointmentError::NotFound("APT-2".into()).into();
        assert_eq!(missing.to_string(), "Not found: appointment APT-2");

        let db: AppError = AppointmentError::Database(DbErr::Custom("boom".into())).into();
        assert_eq!(db.error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppointmentError::DuplicateAppointmentId("APT-1".into()).to_string(),
            "Appointment 'APT-1' already exists"
        );
        assert_eq!(
            AppointmentError::NotFound("APT-1".into()).to_string(),
            "Appointment not found: APT-1"
        );
    }
}
