//! Shared test utilities for the payroll engine.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{core::roster, entities, errors::Result};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test employee with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Employee name; the registration code is derived from it
/// * `salary` - Monthly base salary
pub async fn create_test_employee(
    db: &DatabaseConnection,
    name: &str,
    salary: f64,
) -> Result<entities::employee::Model> {
    roster::create_employee(
        db,
        name.to_string(),
        format!("REG-{name}"),
        "Analista".to_string(),
        salary,
    )
    .await
}

/// Builds an in-memory employee model without touching the database.
/// Useful for exercising the pure calculation path directly.
#[must_use]
pub fn test_employee_model(id: i64, salary: f64) -> entities::employee::Model {
    entities::employee::Model {
        id,
        registration: format!("REG-{id}"),
        name: format!("Employee {id}"),
        role: "Analista".to_string(),
        salary,
        is_terminated: false,
    }
}

/// Builds an in-memory manual entry model without touching the database.
#[must_use]
pub fn manual_entry_model(
    id: i64,
    employee_id: i64,
    month: &str,
    name: &str,
    kind: &str,
    amount: f64,
) -> entities::manual_entry::Model {
    entities::manual_entry::Model {
        id,
        employee_id,
        month: month.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        amount,
    }
}

/// Inserts a ledger row directly, bypassing `add_manual_entry` validation.
/// Used to simulate malformed data reaching the close operation.
pub async fn insert_raw_entry(
    db: &DatabaseConnection,
    employee_id: i64,
    month: &str,
    name: &str,
    kind: &str,
    amount: f64,
) -> Result<entities::manual_entry::Model> {
    let entry = entities::manual_entry::ActiveModel {
        employee_id: Set(employee_id),
        month: Set(month.to_string()),
        name: Set(name.to_string()),
        kind: Set(kind.to_string()),
        amount: Set(amount),
        ..Default::default()
    };
    let result = entry.insert(db).await?;
    Ok(result)
}
