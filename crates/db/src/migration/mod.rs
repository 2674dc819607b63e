//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20250919_152700_create_appointments_table_11a79f2c969c;

/// Revision identifier of the initial schema state.
///
/// Embedded in the migration name, which is what `seaql_migrations` records.
pub const INITIAL_REVISION: &str = "11a79f2c969c";

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250919_152700_create_appointments_table_11a79f2c969c::Migration,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_initial_migration() {
        let migrations = Migrator::migrations();
        assert_eq!(migrations.len(), 1);
        assert_eq!(
            migrations[0].name(),
            "m20250919_152700_create_appointments_table_11a79f2c969c"
        );
    }

    #[test]
    fn test_revision_is_recorded_in_initial_migration() {
        let migrations = Migrator::migrations();
        assert!(migrations[0].name().ends_with(INITIAL_REVISION));
    }
}
