//! Database configuration module for the payroll engine.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Employee, ManualEntry, PayrollEvent, PayrollRecord};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/nexus_payroll.sqlite".to_string()))
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct
/// definitions. It creates tables for employees, manual entries, payroll records, and
/// payroll events.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let employee_table = schema.create_table_from_entity(Employee);
    let manual_entry_table = schema.create_table_from_entity(ManualEntry);
    let payroll_record_table = schema.create_table_from_entity(PayrollRecord);
    let payroll_event_table = schema.create_table_from_entity(PayrollEvent);

    db.execute(builder.build(&employee_table)).await?;
    db.execute(builder.build(&manual_entry_table)).await?;
    db.execute(builder.build(&payroll_record_table)).await?;
    db.execute(builder.build(&payroll_event_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        employee::Model as EmployeeModel, manual_entry::Model as ManualEntryModel,
        payroll_event::Model as PayrollEventModel, payroll_record::Model as PayrollRecordModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<EmployeeModel> = Employee::find().limit(1).all(&db).await?;
        let _: Vec<ManualEntryModel> = ManualEntry::find().limit(1).all(&db).await?;
        let _: Vec<PayrollRecordModel> = PayrollRecord::find().limit(1).all(&db).await?;
        let _: Vec<PayrollEventModel> = PayrollEvent::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_default_database_url() -> Result<()> {
        // Without DATABASE_URL set the default SQLite path is used
        let url = get_database_url()?;
        assert!(url.starts_with("sqlite://"));
        Ok(())
    }
}
