//! Shared errors and configuration for the appointments data layer.
//!
//! This crate provides common types used across all other crates:
//! - Database configuration loaded from files and `POSTGRES_*` variables
//! - Application-wide error types

pub mod config;
pub mod error;

pub use config::DatabaseConfig;
pub use error::{AppError, AppResult};
