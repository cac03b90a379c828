//! Payroll history - the append-only archive of finalized records.
//!
//! Records enter history exactly once, at close time, and are never mutated
//! afterwards. Reads reassemble the full [`MonthlyPayroll`] shape (summary row
//! plus ordered events) for the payslip and reporting surfaces.

use crate::{
    core::payroll::{MonthlyPayroll, PayrollEvent, PayrollEventKind, PayrollEventOrigin, PayrollStatus},
    entities::{PayrollEvent as PayrollEventEntity, PayrollRecord, payroll_event, payroll_record},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Returns true when a `Paid` history record already exists for this employee
/// and month. This is the duplicate guard the close operation consults.
pub async fn is_month_closed_for(
    db: &DatabaseConnection,
    employee_id: i64,
    month: &str,
) -> Result<bool> {
    let existing = PayrollRecord::find_by_id(crate::core::payroll::payroll_id(employee_id, month))
        .one(db)
        .await?;
    Ok(existing.is_some())
}

/// Appends one finalized payroll to history: the summary row plus one event
/// row per line, with an explicit sequence preserving computation order.
///
/// Rejects the append with [`Error::DuplicateClose`] if a record for this
/// employee and month already exists; history rows are never overwritten.
/// Callers run this inside a transaction so the record and its events land
/// atomically.
pub async fn append_record<C>(db: &C, payroll: &MonthlyPayroll) -> Result<payroll_record::Model>
where
    C: ConnectionTrait,
{
    let existing = PayrollRecord::find_by_id(payroll.id.clone()).one(db).await?;
    if existing.is_some() {
        return Err(Error::DuplicateClose {
            employee_id: payroll.employee_id,
            month: payroll.month.clone(),
        });
    }

    let record = payroll_record::ActiveModel {
        id: Set(payroll.id.clone()),
        employee_id: Set(payroll.employee_id),
        month: Set(payroll.month.clone()),
        gross_salary: Set(payroll.gross_salary),
        total_earnings: Set(payroll.total_earnings),
        total_deductions: Set(payroll.total_deductions),
        net_salary: Set(payroll.net_salary),
        fgts_value: Set(payroll.fgts_value),
        status: Set(payroll.status.as_str().to_string()),
        created_at: Set(Utc::now()),
    };
    let inserted = record.insert(db).await?;

    for (sequence, event) in payroll.events.iter().enumerate() {
        let row = payroll_event::ActiveModel {
            payroll_id: Set(payroll.id.clone()),
            sequence: Set(i32::try_from(sequence).map_err(|_| Error::Config {
                message: format!("Event sequence overflow in {}", payroll.id),
            })?),
            event_id: Set(event.id.clone()),
            name: Set(event.name.clone()),
            kind: Set(event.kind.as_str().to_string()),
            amount: Set(event.amount),
            origin: Set(event.origin.as_str().to_string()),
            reference: Set(event.reference.clone()),
            ..Default::default()
        };
        row.insert(db).await?;
    }

    Ok(inserted)
}

fn event_from_row(row: payroll_event::Model) -> Result<PayrollEvent> {
    Ok(PayrollEvent {
        id: row.event_id,
        name: row.name,
        kind: PayrollEventKind::parse(&row.kind)?,
        amount: row.amount,
        origin: PayrollEventOrigin::parse(&row.origin)?,
        reference: row.reference,
    })
}

async fn assemble(
    db: &DatabaseConnection,
    record: payroll_record::Model,
) -> Result<MonthlyPayroll> {
    let events = PayrollEventEntity::find()
        .filter(payroll_event::Column::PayrollId.eq(record.id.clone()))
        .order_by_asc(payroll_event::Column::Sequence)
        .all(db)
        .await?
        .into_iter()
        .map(event_from_row)
        .collect::<Result<Vec<_>>>()?;

    Ok(MonthlyPayroll {
        id: record.id,
        employee_id: record.employee_id,
        month: record.month,
        events,
        total_earnings: record.total_earnings,
        total_deductions: record.total_deductions,
        gross_salary: record.gross_salary,
        net_salary: record.net_salary,
        fgts_value: record.fgts_value,
        status: PayrollStatus::parse(&record.status)?,
    })
}

/// Reassembles one employee's finalized payroll for a month, with events in
/// their original computation order. Returns None if the month was never
/// closed for this employee.
pub async fn record_for(
    db: &DatabaseConnection,
    employee_id: i64,
    month: &str,
) -> Result<Option<MonthlyPayroll>> {
    let record = PayrollRecord::find_by_id(crate::core::payroll::payroll_id(employee_id, month))
        .one(db)
        .await?;

    match record {
        Some(r) => Ok(Some(assemble(db, r).await?)),
        None => Ok(None),
    }
}

/// All finalized records for one month, ordered by employee id.
pub async fn history_for_month(
    db: &DatabaseConnection,
    month: &str,
) -> Result<Vec<MonthlyPayroll>> {
    let records = PayrollRecord::find()
        .filter(payroll_record::Column::Month.eq(month))
        .order_by_asc(payroll_record::Column::EmployeeId)
        .all(db)
        .await?;

    let mut payrolls = Vec::with_capacity(records.len());
    for record in records {
        payrolls.push(assemble(db, record).await?);
    }
    Ok(payrolls)
}

/// All finalized records for one employee, ordered by month key. The `YYYY-MM`
/// format sorts chronologically as a plain string.
pub async fn history_for_employee(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Vec<MonthlyPayroll>> {
    let records = PayrollRecord::find()
        .filter(payroll_record::Column::EmployeeId.eq(employee_id))
        .order_by_asc(payroll_record::Column::Month)
        .all(db)
        .await?;

    let mut payrolls = Vec::with_capacity(records.len());
    for record in records {
        payrolls.push(assemble(db, record).await?);
    }
    Ok(payrolls)
}
