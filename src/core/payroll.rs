//! Pay calculation business logic - the pure projection at the heart of the engine.
//!
//! `calculate_pay` turns an employee, a month key, and the staged manual
//! entries for that month into a fully assembled [`MonthlyPayroll`]. It touches
//! no database and has no side effects: identical inputs always produce a
//! structurally identical record, which is what makes the monthly close
//! idempotent and auditable.

use crate::{
    core::tax,
    entities::{employee, manual_entry},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a payroll event adds to or subtracts from net pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollEventKind {
    /// Adds to net pay ("Provento")
    Earning,
    /// Subtracts from net pay ("Desconto")
    Deduction,
}

impl PayrollEventKind {
    /// String form stored in database columns.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earning => "earning",
            Self::Deduction => "deduction",
        }
    }

    /// Parses the stored string form.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "earning" => Ok(Self::Earning),
            "deduction" => Ok(Self::Deduction),
            other => Err(Error::InvalidKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Provenance of a payroll event. Informational only; never affects the math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollEventOrigin {
    /// Generated by the engine itself (base salary, statutory deductions)
    System,
    /// Derived from time-tracking adjustments
    TimeTracking,
    /// Derived from benefit enrollments
    Benefits,
    /// Entered by HR as a one-off variable event
    Manual,
}

impl PayrollEventOrigin {
    /// String form stored in database columns.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::TimeTracking => "time_tracking",
            Self::Benefits => "benefits",
            Self::Manual => "manual",
        }
    }

    /// Parses the stored string form.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "system" => Ok(Self::System),
            "time_tracking" => Ok(Self::TimeTracking),
            "benefits" => Ok(Self::Benefits),
            "manual" => Ok(Self::Manual),
            other => Err(Error::InvalidOrigin {
                origin: other.to_string(),
            }),
        }
    }
}

/// Lifecycle status of a payroll record. A marker only - it never changes any
/// computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Computed on demand, never persisted
    Open,
    /// Same shape, still unpersisted - used for on-screen preview
    Processed,
    /// Persisted into payroll history, terminal
    Paid,
}

impl PayrollStatus {
    /// String form stored in database columns.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Processed => "processed",
            Self::Paid => "paid",
        }
    }

    /// Parses the stored string form.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "open" => Ok(Self::Open),
            "processed" => Ok(Self::Processed),
            "paid" => Ok(Self::Paid),
            other => Err(Error::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// One earning or deduction line of a payroll record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEvent {
    /// Stable identifier within the record (e.g., `"ev-inss"`, `"me-42"`)
    pub id: String,
    /// Human-readable label (e.g., "Salário Base", "INSS")
    pub name: String,
    /// Earning or deduction
    pub kind: PayrollEventKind,
    /// Monetary value; always non-negative, sign is carried by `kind`
    pub amount: f64,
    /// Where this event came from
    pub origin: PayrollEventOrigin,
    /// Optional free-text reference (e.g., `"30d"` worked)
    pub reference: Option<String>,
}

/// One employee's payroll for one calendar month, fully assembled.
///
/// `events` is ordered by computation: base salary first, then statutory
/// deductions, then manual entries in insertion order. All monetary fields are
/// rounded to cents and satisfy
/// `net_salary = total_earnings - total_deductions` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayroll {
    /// Deterministic identifier: `p-{employee_id}-{month}`
    pub id: String,
    /// Owning employee
    pub employee_id: i64,
    /// Calendar month as a `YYYY-MM` key
    pub month: String,
    /// Ordered event lines
    pub events: Vec<PayrollEvent>,
    /// Sum of earning events
    pub total_earnings: f64,
    /// Sum of deduction events
    pub total_deductions: f64,
    /// Equals `total_earnings`; kept distinct for reporting clarity
    pub gross_salary: f64,
    /// `total_earnings - total_deductions`
    pub net_salary: f64,
    /// FGTS employer provision; excluded from both totals
    pub fgts_value: f64,
    /// Lifecycle marker
    pub status: PayrollStatus,
}

/// Which earnings base the FGTS provision is computed on.
///
/// The statutory deductions are always computed off the base salary; whether
/// FGTS should follow manual earnings too is a policy choice, so it is
/// configurable rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FgtsBase {
    /// 8% of the system-generated base salary only
    BaseSalary,
    /// 8% of all earnings including manual entries (default)
    TotalEarnings,
}

/// What to do when deductions exceed earnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeNetPolicy {
    /// Record the negative net as-is (default)
    Allow,
    /// Reject the calculation with [`Error::NegativeNet`]
    Reject,
}

/// Tunable calculation policy resolving the two ambiguities left open by the
/// observed payroll behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Earnings base for the FGTS provision
    pub fgts_base: FgtsBase,
    /// Handling of pathological negative net pay
    pub negative_net: NegativeNetPolicy,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            fgts_base: FgtsBase::TotalEarnings,
            negative_net: NegativeNetPolicy::Allow,
        }
    }
}

/// Validates a `YYYY-MM` month key.
pub fn validate_month(month: &str) -> Result<()> {
    let padded = format!("{month}-01");
    if month.len() == 7 && NaiveDate::parse_from_str(&padded, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(Error::InvalidMonth {
            month: month.to_string(),
        })
    }
}

/// Rounds a monetary value to currency precision (2 decimals).
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds the deterministic record id for an employee and month.
#[must_use]
pub fn payroll_id(employee_id: i64, month: &str) -> String {
    format!("p-{employee_id}-{month}")
}

fn validate_entry(
    entry: &manual_entry::Model,
    employee_id: i64,
    month: &str,
) -> Result<PayrollEventKind> {
    if entry.employee_id != employee_id || entry.month != month {
        return Err(Error::EntryMismatch {
            entry_id: entry.id,
            employee_id,
            month: month.to_string(),
        });
    }
    if !entry.amount.is_finite() || entry.amount < 0.0 {
        return Err(Error::InvalidAmount {
            amount: entry.amount,
        });
    }
    PayrollEventKind::parse(&entry.kind)
}

/// Calculates one employee's payroll for one month.
///
/// Assembles the ordered event sequence - base salary earning, INSS and IRRF
/// deductions computed off the base salary, then every manual entry in
/// insertion order - and derives the summary figures from it. Statutory
/// deductions are computed on the earnings subtotal at statutory-calc time
/// (the base salary); manual entries never re-trigger them.
///
/// This is a pure projection: it reads nothing beyond its arguments and
/// returns either a complete record with status `Processed` or an error,
/// never a partial result.
pub fn calculate_pay(
    employee: &employee::Model,
    month: &str,
    manual_entries: &[manual_entry::Model],
    policy: &PayrollPolicy,
) -> Result<MonthlyPayroll> {
    validate_month(month)?;

    if !employee.salary.is_finite() || employee.salary < 0.0 {
        return Err(Error::InvalidSalary {
            amount: employee.salary,
        });
    }

    // Base salary is always the first event, even when zero
    let mut events = vec![PayrollEvent {
        id: "ev-salary".to_string(),
        name: "Salário Base".to_string(),
        kind: PayrollEventKind::Earning,
        amount: round_cents(employee.salary),
        origin: PayrollEventOrigin::System,
        reference: Some("30d".to_string()),
    }];

    // Statutory deductions off the earnings subtotal so far (the base salary).
    // Full precision through the bracket walk; rounded once here.
    let taxes = tax::calculate_taxes(employee.salary)?;
    events.push(PayrollEvent {
        id: "ev-inss".to_string(),
        name: "INSS".to_string(),
        kind: PayrollEventKind::Deduction,
        amount: round_cents(taxes.inss),
        origin: PayrollEventOrigin::System,
        reference: None,
    });
    events.push(PayrollEvent {
        id: "ev-irrf".to_string(),
        name: "IRRF".to_string(),
        kind: PayrollEventKind::Deduction,
        amount: round_cents(taxes.irrf),
        origin: PayrollEventOrigin::System,
        reference: None,
    });

    // Manual entries in insertion order, each carrying its own kind
    for entry in manual_entries {
        let kind = validate_entry(entry, employee.id, month)?;
        events.push(PayrollEvent {
            id: format!("me-{}", entry.id),
            name: entry.name.clone(),
            kind,
            amount: round_cents(entry.amount),
            origin: PayrollEventOrigin::Manual,
            reference: None,
        });
    }

    let total_earnings = round_cents(
        events
            .iter()
            .filter(|e| e.kind == PayrollEventKind::Earning)
            .map(|e| e.amount)
            .sum(),
    );
    let total_deductions = round_cents(
        events
            .iter()
            .filter(|e| e.kind == PayrollEventKind::Deduction)
            .map(|e| e.amount)
            .sum(),
    );
    let net_salary = round_cents(total_earnings - total_deductions);

    if policy.negative_net == NegativeNetPolicy::Reject && net_salary < 0.0 {
        return Err(Error::NegativeNet {
            employee_id: employee.id,
            net: net_salary,
        });
    }

    let fgts_base = match policy.fgts_base {
        FgtsBase::BaseSalary => employee.salary,
        FgtsBase::TotalEarnings => total_earnings,
    };
    let fgts_value = round_cents(fgts_base * tax::FGTS_RATE);

    Ok(MonthlyPayroll {
        id: payroll_id(employee.id, month),
        employee_id: employee.id,
        month: month.to_string(),
        events,
        total_earnings,
        total_deductions,
        gross_salary: total_earnings,
        net_salary,
        fgts_value,
        status: PayrollStatus::Processed,
    })
}
