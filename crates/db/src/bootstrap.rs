//! Table bootstrap from declared entities.
//!
//! Creates whatever is missing for first-run and development databases.
//! Deployments use the [`Migrator`](crate::migration::Migrator) instead; the
//! tables built here follow the entity definitions and are not tracked as a
//! migration revision.

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema, TransactionTrait,
    sea_query::TableCreateStatement,
};
use tracing::info;

use crate::entities::appointments;
use crate::schema;

/// Table statements for every entity declared in [`crate::entities`].
fn declared_tables(schema: &Schema) -> Vec<TableCreateStatement> {
    vec![table_for(schema, appointments::Entity)]
}

fn table_for<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    table
}

/// Creates every missing enum type, table and lookup index.
///
/// Runs in a single transaction and is safe to call repeatedly.
///
/// # Errors
///
/// Returns an error if any statement fails; nothing is created in that case.
pub async fn create_db_and_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let txn = db.begin().await?;

    schema::ensure_status_type(&txn).await?;

    let tables = declared_tables(&Schema::new(backend));
    let count = tables.len();
    for table in tables {
        txn.execute(backend.build(&table)).await?;
    }
    txn.execute_unprepared(&schema::create_indexes_sql(true))
        .await?;

    txn.commit().await?;
    info!(tables = count, "Database tables ensured");
    Ok(())
}
