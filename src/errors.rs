//! Unified error type for the payroll engine.
//!
//! Validation errors fail fast and locally: no partial payroll record is ever
//! returned. `DuplicateClose` is non-fatal to a batch close; the orchestrator
//! converts it into a per-employee failure entry instead of propagating it.

use thiserror::Error;

/// All errors the payroll engine can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config files, database path)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Salary input to the tax calculator was negative or non-finite
    #[error("Invalid salary: {amount}")]
    InvalidSalary {
        /// The rejected salary value
        amount: f64,
    },

    /// Monetary amount was negative or non-finite
    #[error("Invalid monetary amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Month key was not a valid `YYYY-MM` string
    #[error("Invalid month key (expected YYYY-MM): {month}")]
    InvalidMonth {
        /// The rejected month key
        month: String,
    },

    /// Stored payroll event kind string did not match any known kind
    #[error("Unknown payroll event kind: {kind}")]
    InvalidKind {
        /// The unrecognized kind string
        kind: String,
    },

    /// Stored payroll event origin string did not match any known origin
    #[error("Unknown payroll event origin: {origin}")]
    InvalidOrigin {
        /// The unrecognized origin string
        origin: String,
    },

    /// Stored payroll status string did not match any known status
    #[error("Unknown payroll status: {status}")]
    InvalidStatus {
        /// The unrecognized status string
        status: String,
    },

    /// Manual entry handed to a calculation for a different employee or month
    #[error("Manual entry {entry_id} does not belong to employee {employee_id} in {month}")]
    EntryMismatch {
        /// Id of the offending manual entry
        entry_id: i64,
        /// Employee the calculation was running for
        employee_id: i64,
        /// Month the calculation was running for
        month: String,
    },

    /// Referenced employee does not exist
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The unknown employee id
        id: i64,
    },

    /// Referenced manual entry does not exist
    #[error("Manual entry not found: {id}")]
    ManualEntryNotFound {
        /// The unknown entry id
        id: i64,
    },

    /// A `Paid` history record already exists for this employee and month
    #[error("Payroll for employee {employee_id} in {month} is already closed")]
    DuplicateClose {
        /// Employee whose close was rejected
        employee_id: i64,
        /// Month of the rejected close
        month: String,
    },

    /// Deductions exceeded earnings under `NegativeNetPolicy::Reject`
    #[error("Net salary for employee {employee_id} is negative: {net:.2}")]
    NegativeNet {
        /// Employee whose net pay went negative
        employee_id: i64,
        /// The computed negative net value
        net: f64,
    },
}

// Convenience `Result` type
/// Crate-wide result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
