//! Manual-entry ledger business logic.
//!
//! Manual entries are one-off variable earnings or deductions staged by HR for
//! a future payroll run, keyed by employee and month. They are consumed (read,
//! not deleted) by the pay calculation, and always returned in insertion order
//! so repeated runs over the same ledger are reproducible.

use crate::{
    core::payroll::{PayrollEventKind, validate_month},
    entities::{ManualEntry, manual_entry},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Stages a manual entry for a future payroll run.
///
/// Validates that the referenced employee exists, the month key is well formed,
/// the amount is finite and non-negative, and the kind is known.
pub async fn add_manual_entry(
    db: &DatabaseConnection,
    employee_id: i64,
    month: &str,
    name: String,
    kind: PayrollEventKind,
    amount: f64,
) -> Result<manual_entry::Model> {
    validate_month(month)?;

    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Manual entry name cannot be empty".to_string(),
        });
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    crate::core::roster::get_employee_by_id(db, employee_id)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    let entry = manual_entry::ActiveModel {
        employee_id: Set(employee_id),
        month: Set(month.to_string()),
        name: Set(name.trim().to_string()),
        kind: Set(kind.as_str().to_string()),
        amount: Set(amount),
        ..Default::default()
    };

    let result = entry.insert(db).await?;
    debug!(
        "Staged manual entry {} for employee {} in {}",
        result.id, employee_id, month
    );
    Ok(result)
}

/// Removes a staged manual entry by id.
pub async fn remove_manual_entry(db: &DatabaseConnection, entry_id: i64) -> Result<()> {
    let entry = ManualEntry::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(Error::ManualEntryNotFound { id: entry_id })?;

    entry.delete(db).await?;
    Ok(())
}

/// Returns every staged entry for a month across all employees, in insertion
/// order.
pub async fn entries_for_month(
    db: &DatabaseConnection,
    month: &str,
) -> Result<Vec<manual_entry::Model>> {
    ManualEntry::find()
        .filter(manual_entry::Column::Month.eq(month))
        .order_by_asc(manual_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the staged entries for one employee and month, in insertion order.
/// This is the exact slice of the ledger the pay calculation consumes.
pub async fn entries_for_employee(
    db: &DatabaseConnection,
    employee_id: i64,
    month: &str,
) -> Result<Vec<manual_entry::Model>> {
    ManualEntry::find()
        .filter(manual_entry::Column::EmployeeId.eq(employee_id))
        .filter(manual_entry::Column::Month.eq(month))
        .order_by_asc(manual_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_employee, setup_test_db};

    #[tokio::test]
    async fn test_add_manual_entry_roundtrip() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Ana", 3000.0).await?;

        let entry = add_manual_entry(
            &db,
            employee.id,
            "2024-11",
            "Bônus".to_string(),
            PayrollEventKind::Earning,
            500.0,
        )
        .await?;

        assert_eq!(entry.kind, "earning");
        assert_eq!(entry.amount, 500.0);
        assert_eq!(entry.month, "2024-11");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_manual_entry_unknown_employee_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        let err = add_manual_entry(
            &db,
            999,
            "2024-11",
            "Bônus".to_string(),
            PayrollEventKind::Earning,
            500.0,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::EmployeeNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_manual_entry_validates_amount_and_month() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Ana", 3000.0).await?;

        let err = add_manual_entry(
            &db,
            employee.id,
            "2024-11",
            "Bônus".to_string(),
            PayrollEventKind::Earning,
            -10.0,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::InvalidAmount { .. }));

        let err = add_manual_entry(
            &db,
            employee.id,
            "nov/2024",
            "Bônus".to_string(),
            PayrollEventKind::Earning,
            10.0,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::InvalidMonth { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_manual_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Ana", 3000.0).await?;

        let entry = add_manual_entry(
            &db,
            employee.id,
            "2024-11",
            "Bônus".to_string(),
            PayrollEventKind::Earning,
            500.0,
        )
        .await?;

        remove_manual_entry(&db, entry.id).await?;
        assert!(entries_for_month(&db, "2024-11").await?.is_empty());

        let err = remove_manual_entry(&db, entry.id).await.unwrap_err();
        assert!(matches!(err, Error::ManualEntryNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_entries_returned_in_insertion_order() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Ana", 3000.0).await?;

        for (name, kind, amount) in [
            ("Bônus", PayrollEventKind::Earning, 500.0),
            ("Vale", PayrollEventKind::Deduction, 120.0),
            ("Hora Extra", PayrollEventKind::Earning, 250.0),
        ] {
            add_manual_entry(&db, employee.id, "2024-11", name.to_string(), kind, amount).await?;
        }

        let entries = entries_for_employee(&db, employee.id, "2024-11").await?;
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bônus", "Vale", "Hora Extra"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_entries_scoped_by_employee_and_month() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_employee(&db, "Ana", 3000.0).await?;
        let bia = create_test_employee(&db, "Bia", 4000.0).await?;

        add_manual_entry(&db, ana.id, "2024-11", "A".to_string(), PayrollEventKind::Earning, 1.0)
            .await?;
        add_manual_entry(&db, bia.id, "2024-11", "B".to_string(), PayrollEventKind::Earning, 2.0)
            .await?;
        add_manual_entry(&db, ana.id, "2024-12", "C".to_string(), PayrollEventKind::Earning, 3.0)
            .await?;

        let ana_nov = entries_for_employee(&db, ana.id, "2024-11").await?;
        assert_eq!(ana_nov.len(), 1);
        assert_eq!(ana_nov[0].name, "A");

        let all_nov = entries_for_month(&db, "2024-11").await?;
        assert_eq!(all_nov.len(), 2);

        Ok(())
    }
}
