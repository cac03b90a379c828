//! Payroll event entity - One earning or deduction line of a finalized record.
//!
//! Events are persisted with an explicit `sequence` column so that the
//! computation order (base salary first, then statutory deductions, then
//! manual entries) survives the round trip through the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payroll event database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_events")]
pub struct Model {
    /// Unique identifier for the event row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Payroll record this event belongs to
    pub payroll_id: String,
    /// Zero-based position within the record's event sequence
    pub sequence: i32,
    /// Stable event identifier within the record (e.g., `"ev-inss"`, `"me-42"`)
    pub event_id: String,
    /// Human-readable label (e.g., "Salário Base", "INSS")
    pub name: String,
    /// Event kind: `"earning"` or `"deduction"`
    pub kind: String,
    /// Monetary value; always non-negative, sign is carried by `kind`
    pub amount: f64,
    /// Provenance: `"system"`, `"time_tracking"`, `"benefits"`, or `"manual"`
    pub origin: String,
    /// Optional free-text reference (e.g., `"30d"` worked)
    pub reference: Option<String>,
}

/// Defines relationships between `PayrollEvent` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each event belongs to one payroll record
    #[sea_orm(
        belongs_to = "super::payroll_record::Entity",
        from = "Column::PayrollId",
        to = "super::payroll_record::Column::Id"
    )]
    PayrollRecord,
}

impl Related<super::payroll_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
