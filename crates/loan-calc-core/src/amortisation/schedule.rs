use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::emi::emi_amount;
use super::LoanInput;
use crate::time_value::checked;
use crate::types::*;
use crate::LoanCalcResult;

/// One month of the amortisation schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortisationRow {
    pub month: u32,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

/// Full schedule with lifetime totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortisationOutput {
    pub emi: Money,
    pub monthly_rate: Rate,
    pub num_months: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub rows: Vec<AmortisationRow>,
}

/// Result of a form-driven calculation. Empty when the input was rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmortisationSchedule {
    pub emi: Option<Money>,
    pub rows: Vec<AmortisationRow>,
}

impl AmortisationSchedule {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.emi.is_none() && self.rows.is_empty()
    }
}

/// Split each payment into interest on the opening balance and principal.
///
/// The running balance is left as computed; only the recorded figures are
/// floored at zero, which matters for the final month's rounding residue.
fn amortise(
    principal: Money,
    rate: Rate,
    emi: Money,
    num_months: u32,
) -> LoanCalcResult<Vec<AmortisationRow>> {
    let mut rows = Vec::with_capacity(num_months as usize);
    let mut balance = principal;

    for month in 1..=num_months {
        let interest = checked(balance.checked_mul(rate), "monthly interest")?;
        let principal_part = checked(emi.checked_sub(interest), "monthly principal")?;
        balance = checked(balance.checked_sub(principal_part), "running balance")?;

        rows.push(AmortisationRow {
            month,
            principal: principal_part.max(Decimal::ZERO),
            interest: interest.max(Decimal::ZERO),
            balance: balance.max(Decimal::ZERO),
        });
    }

    Ok(rows)
}

fn checked_sum(mut amounts: impl Iterator<Item = Money>, context: &str) -> LoanCalcResult<Money> {
    amounts.try_fold(Decimal::ZERO, |acc, x| checked(acc.checked_add(x), context))
}

/// Build the month-by-month amortisation schedule for a loan.
pub fn build_amortisation_schedule(
    input: &LoanInput,
) -> LoanCalcResult<ComputationOutput<AmortisationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let emi = emi_amount(input)?;
    let rate = input.monthly_rate();
    let num_months = input.num_months();

    let rows = amortise(input.principal, rate, emi, num_months)?;

    let total_principal = checked_sum(rows.iter().map(|r| r.principal), "total principal")?;
    let total_interest = checked_sum(rows.iter().map(|r| r.interest), "total interest")?;
    let total_paid = checked(total_principal.checked_add(total_interest), "total paid")?;

    if total_interest > input.principal {
        warnings.push("Total interest exceeds the amount borrowed".into());
    }

    let output = AmortisationOutput {
        emi,
        monthly_rate: rate,
        num_months,
        total_principal,
        total_interest,
        total_paid,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortisation schedule (fixed EMI, monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Fail-soft schedule for form input.
///
/// Any non-positive amount, rate or term gives an empty schedule and no EMI
/// instead of an error. The term is truncated to whole years.
pub fn compute_schedule(
    principal: Money,
    annual_rate_pct: Decimal,
    term_years: Decimal,
) -> AmortisationSchedule {
    let Some(years) = term_years.trunc().to_u32() else {
        log::debug!("rejected loan term {term_years}: not a whole number of years");
        return AmortisationSchedule::empty();
    };

    let input = LoanInput::new(principal, annual_rate_pct, years);
    match build_amortisation_schedule(&input) {
        Ok(output) => AmortisationSchedule {
            emi: Some(output.result.emi),
            rows: output.result.rows,
        },
        Err(e) => {
            log::debug!("rejected loan input: {e}");
            AmortisationSchedule::empty()
        }
    }
}
