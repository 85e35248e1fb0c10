use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::amortisation::emi::{self, EmiOutput};
use loan_calc_core::amortisation::schedule::{self, AmortisationOutput};
use loan_calc_core::amortisation::LoanInput;
use loan_calc_core::dashboard::calculator::{DEFAULT_AMOUNT, DEFAULT_RATE, DEFAULT_YEARS};
use loan_calc_core::{round_money, Currency};

use crate::input;

/// Loan terms shared by the EMI and schedule commands
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount [default: 100000]
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent, e.g. 8.5 [default: 8.5]
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in whole years [default: 5]
    #[arg(long)]
    pub years: Option<u32>,

    /// Currency label for amounts (no conversion is applied)
    #[arg(long, default_value = "USD")]
    pub currency: Currency,
}

/// Arguments for the EMI summary
#[derive(Args)]
pub struct EmiArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for the full amortisation schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Keep full decimal precision instead of rounding amounts to cents
    #[arg(long)]
    pub full_precision: bool,
}

impl LoanArgs {
    fn has_flags(&self) -> bool {
        self.amount.is_some() || self.rate.is_some() || self.years.is_some()
    }

    fn resolve(&self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_input(path);
        }
        if !self.has_flags() {
            if let Some(loan) = input::stdin::read_stdin()? {
                return Ok(loan);
            }
        }
        Ok(LoanInput::new(
            self.amount.unwrap_or(DEFAULT_AMOUNT.parse()?),
            self.rate.unwrap_or(DEFAULT_RATE.parse()?),
            self.years.unwrap_or(DEFAULT_YEARS.parse()?),
        ))
    }
}

fn with_currency(mut value: Value, currency: Currency) -> Value {
    if let Value::Object(ref mut map) = value {
        map.insert("currency".into(), Value::String(currency.code().into()));
    }
    value
}

fn round_emi(out: &mut EmiOutput) {
    out.emi = round_money(out.emi);
    out.total_paid = round_money(out.total_paid);
    out.total_interest = round_money(out.total_interest);
}

fn round_schedule(out: &mut AmortisationOutput) {
    out.emi = round_money(out.emi);
    out.total_principal = round_money(out.total_principal);
    out.total_interest = round_money(out.total_interest);
    out.total_paid = round_money(out.total_paid);
    for row in &mut out.rows {
        row.principal = round_money(row.principal);
        row.interest = round_money(row.interest);
        row.balance = round_money(row.balance);
    }
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let mut result = emi::calculate_emi(&loan)?;
    round_emi(&mut result.result);
    Ok(with_currency(serde_json::to_value(result)?, args.loan.currency))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let mut result = schedule::build_amortisation_schedule(&loan)?;
    if !args.full_precision {
        round_schedule(&mut result.result);
    }
    Ok(with_currency(serde_json::to_value(result)?, args.loan.currency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flags(amount: Decimal, rate: Decimal, years: u32) -> LoanArgs {
        LoanArgs {
            input: None,
            amount: Some(amount),
            rate: Some(rate),
            years: Some(years),
            currency: Currency::INR,
        }
    }

    #[test]
    fn test_run_emi_rounds_and_labels() {
        let value = run_emi(EmiArgs {
            loan: flags(dec!(100000), dec!(8.5), 5),
        })
        .unwrap();
        assert_eq!(value["currency"], "INR");
        assert_eq!(value["result"]["emi"], "2051.65");
        assert_eq!(value["result"]["num_months"], 60);
    }

    #[test]
    fn test_run_schedule_rows() {
        let value = run_schedule(ScheduleArgs {
            loan: flags(dec!(100000), dec!(8.5), 5),
            full_precision: false,
        })
        .unwrap();
        let rows = value["result"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 60);
        assert_eq!(rows[0]["interest"], "708.33");
        assert_eq!(rows[0]["balance"], "98656.68");
    }

    #[test]
    fn test_run_emi_overflow_errors() {
        let result = run_emi(EmiArgs {
            loan: flags(dec!(70000000000000000000000000000), dec!(8.5), 5),
        });
        let err = result.err().unwrap().to_string();
        assert!(err.contains("overflow"), "{err}");
    }

    #[test]
    fn test_run_schedule_invalid_input_errors() {
        let result = run_schedule(ScheduleArgs {
            loan: flags(dec!(0), dec!(8.5), 5),
            full_precision: false,
        });
        assert!(result.is_err());
    }
}
