use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::LoanInput;
use crate::time_value::{self, checked};
use crate::types::*;
use crate::LoanCalcResult;

/// Summary of the fixed monthly payment for a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub emi: Money,
    pub monthly_rate: Rate,
    pub num_months: u32,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// EMI = P·R·(1+R)^N / ((1+R)^N − 1), with R the monthly rate and N the
/// number of months. Validates the input first.
pub fn emi_amount(input: &LoanInput) -> LoanCalcResult<Money> {
    input.validate()?;
    let payment = time_value::pmt(
        input.monthly_rate(),
        input.num_months(),
        input.principal,
        Decimal::ZERO,
    )?;
    Ok(-payment)
}

/// Calculate the equated monthly instalment and lifetime totals.
pub fn calculate_emi(input: &LoanInput) -> LoanCalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let emi = emi_amount(input)?;
    let num_months = input.num_months();
    let total_paid = checked(emi.checked_mul(Decimal::from(num_months)), "total paid")?;
    let total_interest = checked(total_paid.checked_sub(input.principal), "total interest")?;

    if total_interest > input.principal {
        warnings.push("Total interest exceeds the amount borrowed".into());
    }

    log::trace!(
        "emi: principal={} rate_pct={} months={} emi={}",
        input.principal,
        input.annual_rate_pct,
        num_months,
        emi
    );

    let output = EmiOutput {
        emi,
        monthly_rate: input.monthly_rate(),
        num_months,
        total_paid,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equated Monthly Instalment (annuity formula)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
