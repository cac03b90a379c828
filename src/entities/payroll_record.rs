//! Payroll record entity - One employee's finalized payroll for one month.
//!
//! The primary key is derived deterministically from the employee and month
//! (`p-{employee_id}-{month}`), so the table itself enforces that a month can
//! only be closed once per employee. Rows are append-only: once written with
//! status `"paid"` they are never mutated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payroll record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_records")]
pub struct Model {
    /// Deterministic identifier: `p-{employee_id}-{month}`
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Employee this record belongs to
    pub employee_id: i64,
    /// Calendar month of the record, as a `YYYY-MM` key
    pub month: String,
    /// Sum of all earning events; equals `total_earnings`, kept as a distinct
    /// column for reporting clarity
    pub gross_salary: f64,
    /// Sum of all earning events
    pub total_earnings: f64,
    /// Sum of all deduction events
    pub total_deductions: f64,
    /// `total_earnings - total_deductions`, exact to the cent
    pub net_salary: f64,
    /// FGTS employer provision; not part of earnings or deductions
    pub fgts_value: f64,
    /// Lifecycle status: `"open"`, `"processed"`, or `"paid"`
    pub status: String,
    /// When this record was appended to history
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `PayrollRecord` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    /// One record has many ordered payroll events
    #[sea_orm(has_many = "super::payroll_event::Entity")]
    Events,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::payroll_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
