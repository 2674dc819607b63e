//! `SeaORM` Entity for appointments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AppointmentStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub appointment_id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub facility_id: String,
    pub doctor_name: String,
    pub patient_name: String,
    pub appointment_date: Date,
    pub appointment_start_time: Time,
    pub appointment_end_time: Time,
    pub purpose_of_visit: String,
    pub description: Option<String>,
    #[sea_orm(default_value = "SCHEDULED")]
    pub status: AppointmentStatus,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTime,
    pub updated_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
