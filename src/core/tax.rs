//! Statutory withholding calculator - INSS, IRRF, and FGTS.
//!
//! Both progressive taxes share a single generic bracket lookup parameterized
//! by a data table, so the bracket-walk logic exists once and the tables can
//! be updated independently when the statutory values change (the 2024 tables
//! are encoded below). All arithmetic is kept at full `f64` precision; rounding
//! to cents happens only when the final payroll record is assembled.

use crate::errors::{Error, Result};

/// One row of a progressive tax table.
///
/// A salary `base` falls into the first bracket whose `upper_bound` is greater
/// than or equal to `base` (boundary values belong to the lower bracket), and
/// the withholding is `base * rate - deduction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    /// Inclusive upper bound of this bracket
    pub upper_bound: f64,
    /// Marginal rate applied to the full base
    pub rate: f64,
    /// Cumulative deduction subtracted after applying the rate
    pub deduction: f64,
}

/// A progressive tax table: ordered brackets plus an optional statutory cap
/// applied to any base above the last bracket's upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxTable {
    /// Brackets in ascending order of `upper_bound`
    pub brackets: &'static [TaxBracket],
    /// Flat withholding for bases beyond all brackets (INSS ceiling)
    pub cap: Option<f64>,
}

/// INSS social-security table, 2024 values. Withholding above the top bracket
/// is capped by statute at a flat value, not computed by rate.
pub const INSS_TABLE: TaxTable = TaxTable {
    brackets: &[
        TaxBracket {
            upper_bound: 1412.00,
            rate: 0.075,
            deduction: 0.0,
        },
        TaxBracket {
            upper_bound: 2666.68,
            rate: 0.09,
            deduction: 21.18,
        },
        TaxBracket {
            upper_bound: 4000.03,
            rate: 0.12,
            deduction: 101.18,
        },
        TaxBracket {
            upper_bound: 7786.02,
            rate: 0.14,
            deduction: 181.18,
        },
    ],
    cap: Some(908.85),
};

/// IRRF income-tax table, 2024 values. Applied to the taxable base
/// (gross minus INSS), never to the gross salary directly.
pub const IRRF_TABLE: TaxTable = TaxTable {
    brackets: &[
        TaxBracket {
            upper_bound: 2112.00,
            rate: 0.0,
            deduction: 0.0,
        },
        TaxBracket {
            upper_bound: 2826.65,
            rate: 0.075,
            deduction: 158.40,
        },
        TaxBracket {
            upper_bound: 3751.05,
            rate: 0.15,
            deduction: 370.40,
        },
        TaxBracket {
            upper_bound: 4664.68,
            rate: 0.225,
            deduction: 651.73,
        },
        TaxBracket {
            upper_bound: f64::INFINITY,
            rate: 0.275,
            deduction: 884.96,
        },
    ],
    cap: None,
};

/// FGTS employer provision rate: flat 8% of earnings, never withheld from the
/// employee's net pay.
pub const FGTS_RATE: f64 = 0.08;

/// The three statutory figures produced for one gross salary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxWithholdings {
    /// Social-security withholding (employee-side deduction)
    pub inss: f64,
    /// Withheld income tax (employee-side deduction)
    pub irrf: f64,
    /// Employer severance provision (not deducted from net pay)
    pub fgts: f64,
}

/// Walks a progressive table and returns the withholding for `base`.
///
/// Returns the first matching bracket's `base * rate - deduction`, floored at
/// zero. Bases beyond every bracket fall back to the table's flat cap.
#[must_use]
pub fn progressive_withholding(base: f64, table: &TaxTable) -> f64 {
    for bracket in table.brackets {
        if base <= bracket.upper_bound {
            return (base * bracket.rate - bracket.deduction).max(0.0);
        }
    }
    table.cap.unwrap_or(0.0)
}

/// Computes INSS, IRRF, and FGTS for a gross monthly salary.
///
/// IRRF is chained on the taxable base `gross - inss`, matching the statutory
/// model. Rejects negative or non-finite input; this function never partially
/// computes.
pub fn calculate_taxes(gross_salary: f64) -> Result<TaxWithholdings> {
    if !gross_salary.is_finite() || gross_salary < 0.0 {
        return Err(Error::InvalidSalary {
            amount: gross_salary,
        });
    }

    let inss = progressive_withholding(gross_salary, &INSS_TABLE);
    let taxable_base = gross_salary - inss;
    let irrf = progressive_withholding(taxable_base, &IRRF_TABLE);
    let fgts = gross_salary * FGTS_RATE;

    Ok(TaxWithholdings { inss, irrf, fgts })
}
