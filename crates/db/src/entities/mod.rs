//! `SeaORM` entity definitions.
//!
//! Every entity listed here is created by
//! [`create_db_and_tables`](crate::create_db_and_tables).

#![allow(missing_docs)]

pub mod appointments;
pub mod sea_orm_active_enums;

pub mod prelude {
    pub use super::appointments::Entity as Appointments;
}
