//! Manual entry entity - One-off variable earnings and deductions.
//!
//! A manual entry is staged by HR for a specific employee and payroll month
//! before that month's close. It is consumed (read, not deleted) when the pay
//! calculation runs. The autoincrement primary key doubles as insertion order,
//! which keeps repeated calculations over the same ledger reproducible.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Manual entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manual_entries")]
pub struct Model {
    /// Unique identifier; ordering by id reproduces insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee this entry is staged for
    pub employee_id: i64,
    /// Payroll month this entry targets, as a `YYYY-MM` key
    pub month: String,
    /// Human-readable label (e.g., "Bônus", "Vale Transporte")
    pub name: String,
    /// Event kind: `"earning"` or `"deduction"`
    pub kind: String,
    /// Monetary value; always non-negative, sign is carried by `kind`
    pub amount: f64,
}

/// Defines relationships between `ManualEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each manual entry belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
