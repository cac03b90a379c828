//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod employee;
pub mod manual_entry;
pub mod payroll_event;
pub mod payroll_record;

// Re-export specific types to avoid conflicts
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use manual_entry::{
    Column as ManualEntryColumn, Entity as ManualEntry, Model as ManualEntryModel,
};
pub use payroll_event::{
    Column as PayrollEventColumn, Entity as PayrollEvent, Model as PayrollEventModel,
};
pub use payroll_record::{
    Column as PayrollRecordColumn, Entity as PayrollRecord, Model as PayrollRecordModel,
};
