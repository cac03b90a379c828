//! Core business logic - framework-agnostic payroll operations.
//!
//! The calculation path is pure ([`tax`] and [`payroll::calculate_pay`]); the
//! surrounding modules are the engine's data-access collaborators: the roster
//! it reads employees from, the manual-entry ledger it consumes, and the
//! append-only history it writes at close time.

/// Monthly close orchestration and batch reporting
pub mod close;
/// Payroll history queries and append
pub mod history;
/// Manual-entry ledger operations
pub mod manual;
/// Pay calculation, event assembly, and core value types
pub mod payroll;
/// Employee roster operations and seeding
pub mod roster;
/// Statutory withholding calculator (INSS, IRRF, FGTS)
pub mod tax;
