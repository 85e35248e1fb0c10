//! Equated monthly instalment (EMI) and amortisation schedules for a fixed
//! rate loan with monthly compounding.

pub mod emi;
pub mod schedule;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::time_value::{self, MONTHS_PER_YEAR};
use crate::types::{Money, Rate};
use crate::LoanCalcResult;

/// Longest term accepted, in years. Guards the schedule allocation.
pub const MAX_TERM_YEARS: u32 = 1_000;

/// Loan terms as entered by the borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual interest rate as a percentage (8.5 = 8.5%)
    pub annual_rate_pct: Decimal,
    /// Term in whole years
    pub term_years: u32,
}

impl LoanInput {
    pub fn new(principal: Money, annual_rate_pct: Decimal, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            term_years,
        }
    }

    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanCalcError::InvalidInput {
                field: "principal".into(),
                reason: "Loan amount must be positive".into(),
            });
        }
        if self.annual_rate_pct <= Decimal::ZERO {
            return Err(LoanCalcError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: "Interest rate must be positive".into(),
            });
        }
        if self.term_years == 0 {
            return Err(LoanCalcError::InvalidInput {
                field: "term_years".into(),
                reason: "Term must be at least 1 year".into(),
            });
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(LoanCalcError::InvalidInput {
                field: "term_years".into(),
                reason: format!("Term must not exceed {MAX_TERM_YEARS} years"),
            });
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> Rate {
        time_value::monthly_rate(self.annual_rate_pct)
    }

    pub fn num_months(&self) -> u32 {
        self.term_years * MONTHS_PER_YEAR
    }
}
