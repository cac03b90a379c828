//! Employee entity - Represents the payroll-relevant slice of the roster.
//!
//! Each employee has a registration code, role, and current base salary.
//! Termination is a soft flag so that payroll history for former employees
//! stays queryable after they leave.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Registration code used by HR (e.g., "NX001")
    pub registration: String,
    /// Full name of the employee
    pub name: String,
    /// Job title (e.g., "Analista de RH")
    pub role: String,
    /// Current monthly base salary
    pub salary: f64,
    /// Soft termination flag - terminated employees are excluded from close
    /// runs but their payroll history is preserved
    pub is_terminated: bool,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many staged manual entries
    #[sea_orm(has_many = "super::manual_entry::Entity")]
    ManualEntries,
    /// One employee has many finalized payroll records
    #[sea_orm(has_many = "super::payroll_record::Entity")]
    PayrollRecords,
}

impl Related<super::manual_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManualEntries.def()
    }
}

impl Related<super::payroll_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
