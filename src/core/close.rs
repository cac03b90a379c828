//! Monthly close business logic.
//!
//! The close is the irreversible batch operation that finalizes a month: for
//! every active employee it runs the pay calculation, forces the record to
//! `Paid`, and appends it to history. Employees are isolated from each other -
//! one malformed ledger entry fails that employee alone and the batch carries
//! on, reporting every skip and failure instead of throwing for the whole run.

use crate::{
    core::{history, manual, payroll, roster},
    entities::employee,
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};

/// One employee's failure within a batch close.
#[derive(Debug, Clone)]
pub struct CloseFailure {
    /// Employee whose close did not happen
    pub employee_id: i64,
    /// Employee name, for the batch report
    pub employee_name: String,
    /// Human-readable failure reason
    pub reason: String,
}

/// Aggregate result of a batch close: which employees were finalized and which
/// failed with what. The close itself never throws for the whole batch.
#[derive(Debug, Clone)]
pub struct CloseReport {
    /// Month that was closed
    pub month: String,
    /// Records appended to history, in processing order
    pub closed: Vec<payroll::MonthlyPayroll>,
    /// Per-employee failures, in processing order
    pub failures: Vec<CloseFailure>,
}

impl CloseReport {
    /// Number of employees whose payroll was finalized.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// Number of employees skipped or failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Computes `Processed` drafts for every active employee without persisting
/// anything - the on-screen preview stage before a close is committed.
pub async fn preview_month(
    db: &DatabaseConnection,
    month: &str,
    policy: &payroll::PayrollPolicy,
) -> Result<Vec<payroll::MonthlyPayroll>> {
    payroll::validate_month(month)?;

    let employees = roster::active_employees(db).await?;
    let mut drafts = Vec::with_capacity(employees.len());
    for employee in &employees {
        let entries = manual::entries_for_employee(db, employee.id, month).await?;
        drafts.push(payroll::calculate_pay(employee, month, &entries, policy)?);
    }
    Ok(drafts)
}

async fn close_employee(
    db: &DatabaseConnection,
    employee: &employee::Model,
    month: &str,
    policy: &payroll::PayrollPolicy,
) -> Result<payroll::MonthlyPayroll> {
    if history::is_month_closed_for(db, employee.id, month).await? {
        return Err(Error::DuplicateClose {
            employee_id: employee.id,
            month: month.to_string(),
        });
    }

    let entries = manual::entries_for_employee(db, employee.id, month).await?;
    let mut finalized = payroll::calculate_pay(employee, month, &entries, policy)?;
    finalized.status = payroll::PayrollStatus::Paid;

    // Record and events land atomically; a failure here leaves no partial rows
    let txn = db.begin().await?;
    history::append_record(&txn, &finalized).await?;
    txn.commit().await?;

    Ok(finalized)
}

/// Closes a month for every active employee.
///
/// Each employee is processed independently: an existing history record yields
/// a `DuplicateClose` skip, a calculation error yields a failure entry, and
/// neither disturbs the records already appended for other employees. The
/// returned [`CloseReport`] lists both outcomes; callers surface it rather
/// than a single pass/fail flag.
pub async fn close_month(
    db: &DatabaseConnection,
    month: &str,
    policy: &payroll::PayrollPolicy,
) -> Result<CloseReport> {
    payroll::validate_month(month)?;

    let employees = roster::active_employees(db).await?;
    info!(
        "Closing payroll for {} across {} active employees",
        month,
        employees.len()
    );

    let mut report = CloseReport {
        month: month.to_string(),
        closed: Vec::new(),
        failures: Vec::new(),
    };

    for employee in &employees {
        match close_employee(db, employee, month, policy).await {
            Ok(finalized) => report.closed.push(finalized),
            Err(err) => {
                warn!(
                    "Payroll close failed for employee {} ({}): {}",
                    employee.id, employee.name, err
                );
                report.failures.push(CloseFailure {
                    employee_id: employee.id,
                    employee_name: employee.name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        "Payroll close for {} finished: {} closed, {} failed",
        month,
        report.closed_count(),
        report.failure_count()
    );
    Ok(report)
}

/// Formats a close report into a human-readable summary string, useful for
/// logging or displaying the outcome of a batch close.
#[must_use]
pub fn format_close_summary(report: &CloseReport) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Payroll Close - {} - {} closed, {} failed\n\n",
        report.month,
        report.closed_count(),
        report.failure_count()
    );

    // write! is infallible when writing to String, so unwrap is safe
    for payroll in &report.closed {
        writeln!(
            summary,
            "  #{} | gross R${:.2} | deductions R${:.2} | net R${:.2} | FGTS R${:.2}",
            payroll.employee_id,
            payroll.gross_salary,
            payroll.total_deductions,
            payroll.net_salary,
            payroll.fgts_value
        )
        .unwrap();
    }

    for failure in &report.failures {
        writeln!(
            summary,
            "  FAILED #{} ({}): {}",
            failure.employee_id, failure.employee_name, failure.reason
        )
        .unwrap();
    }

    summary
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::payroll::{PayrollEventKind, PayrollPolicy, PayrollStatus};
    use crate::entities::PayrollRecord;
    use crate::test_utils::{
        create_test_employee, insert_raw_entry, setup_test_db,
    };
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_close_month_appends_paid_records() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "Ana", 5000.0).await?;
        create_test_employee(&db, "Bia", 3000.0).await?;

        let report = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(report.closed_count(), 2);
        assert_eq!(report.failure_count(), 0);
        assert!(report.closed.iter().all(|p| p.status == PayrollStatus::Paid));

        let persisted = history::history_for_month(&db, "2024-11").await?;
        assert_eq!(persisted.len(), 2);
        assert!(persisted.iter().all(|p| p.status == PayrollStatus::Paid));

        Ok(())
    }

    #[tokio::test]
    async fn test_close_month_consumes_manual_entries() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_employee(&db, "Ana", 5000.0).await?;
        crate::core::manual::add_manual_entry(
            &db,
            ana.id,
            "2024-11",
            "Bônus".to_string(),
            PayrollEventKind::Earning,
            1000.0,
        )
        .await?;

        let report = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(report.closed_count(), 1);

        let record = history::record_for(&db, ana.id, "2024-11").await?.unwrap();
        assert_eq!(record.events.len(), 4);
        assert_eq!(record.events[3].name, "Bônus");

        // Consumed means read, not deleted: the ledger entry survives
        let remaining = crate::core::manual::entries_for_month(&db, "2024-11").await?;
        assert_eq!(remaining.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_closing_twice_reports_duplicates_and_leaves_history_unchanged() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "Ana", 5000.0).await?;
        create_test_employee(&db, "Bia", 3000.0).await?;

        let first = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(first.closed_count(), 2);

        let second = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(second.closed_count(), 0);
        assert_eq!(second.failure_count(), 2);
        assert!(second
            .failures
            .iter()
            .all(|f| f.reason.contains("already closed")));

        // Exactly one record per employee, no duplicates
        let all = PayrollRecord::find().all(&db).await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_one_malformed_entry_fails_only_that_employee() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_employee(&db, "Ana", 5000.0).await?;
        let bia = create_test_employee(&db, "Bia", 3000.0).await?;
        create_test_employee(&db, "Caio", 2000.0).await?;

        // Malformed row written straight to the ledger, bypassing validation
        insert_raw_entry(&db, bia.id, "2024-11", "Bônus", "bogus-kind", 100.0).await?;

        let report = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(report.closed_count(), 2);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures[0].employee_id, bia.id);

        let persisted = history::history_for_month(&db, "2024-11").await?;
        assert_eq!(persisted.len(), 2);
        assert!(persisted.iter().any(|p| p.employee_id == ana.id));
        assert!(!persisted.iter().any(|p| p.employee_id == bia.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_employee_can_be_closed_after_fix() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_employee(&db, "Ana", 5000.0).await?;
        let entry = insert_raw_entry(&db, ana.id, "2024-11", "Bônus", "bogus-kind", 100.0).await?;

        let report = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(report.failure_count(), 1);

        // Fix the data and re-invoke explicitly; no automatic retry exists
        crate::core::manual::remove_manual_entry(&db, entry.id).await?;
        let retry = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(retry.closed_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_terminated_employees_excluded_from_close() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "Ana", 5000.0).await?;
        let gone = create_test_employee(&db, "Gone", 4000.0).await?;
        crate::core::roster::terminate_employee(&db, gone.id).await?;

        let report = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(report.closed_count(), 1);
        assert!(!history::is_month_closed_for(&db, gone.id, "2024-11").await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_month_persists_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "Ana", 5000.0).await?;

        let drafts = preview_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].status, PayrollStatus::Processed);

        assert!(history::history_for_month(&db, "2024-11").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_matches_close_amounts() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "Ana", 5000.0).await?;

        let drafts = preview_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        let report = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;

        assert_eq!(drafts[0].net_salary, report.closed[0].net_salary);
        assert_eq!(drafts[0].events, report.closed[0].events);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_month_rejects_whole_batch() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "Ana", 5000.0).await?;

        let err = close_month(&db, "nov-2024", &PayrollPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMonth { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_format_close_summary() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_employee(&db, "Ana", 5000.0).await?;
        let bia = create_test_employee(&db, "Bia", 3000.0).await?;
        insert_raw_entry(&db, bia.id, "2024-11", "Bônus", "bogus-kind", 100.0).await?;

        let report = close_month(&db, "2024-11", &PayrollPolicy::default()).await?;
        let summary = format_close_summary(&report);

        assert!(summary.contains("2024-11"));
        assert!(summary.contains("1 closed, 1 failed"));
        assert!(summary.contains(&format!("#{}", ana.id)));
        assert!(summary.contains("FAILED"));
        assert!(summary.contains("Bia"));

        Ok(())
    }
}
