use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::amortisation::schedule::{compute_schedule, AmortisationRow, AmortisationSchedule};
use crate::types::*;

pub const DEFAULT_AMOUNT: &str = "100000";
pub const DEFAULT_RATE: &str = "8.5";
pub const DEFAULT_YEARS: &str = "5";

/// A schedule row formatted for display, amounts suffixed with the currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedRow {
    pub month: u32,
    pub principal: String,
    pub interest: String,
    pub balance: String,
}

/// Loan form state: raw field text, selected currency and the last result.
///
/// Fields hold exactly what was typed. Nothing is parsed until
/// [`LoanCalculator::calculate`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanCalculator {
    amount: String,
    rate: String,
    years: String,
    currency: Currency,
    schedule: AmortisationSchedule,
}

impl Default for LoanCalculator {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT.into(),
            rate: DEFAULT_RATE.into(),
            years: DEFAULT_YEARS.into(),
            currency: Currency::default(),
            schedule: AmortisationSchedule::empty(),
        }
    }
}

/// Parse numeric field text. Accepts plain and scientific notation.
fn parse_field(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

impl LoanCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn rate(&self) -> &str {
        &self.rate
    }

    pub fn years(&self) -> &str {
        &self.years
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.amount = text.into();
    }

    pub fn set_rate(&mut self, text: impl Into<String>) {
        self.rate = text.into();
    }

    pub fn set_years(&mut self, text: impl Into<String>) {
        self.years = text.into();
    }

    /// Changes the label only; amounts are never converted.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Run the engine on the current fields and keep the result. Unparseable
    /// or non-positive fields clear any previous result.
    pub fn calculate(&mut self) -> Option<Money> {
        self.schedule = match (
            parse_field(&self.amount),
            parse_field(&self.rate),
            parse_field(&self.years),
        ) {
            (Some(amount), Some(rate), Some(years)) => compute_schedule(amount, rate, years),
            _ => {
                log::debug!(
                    "non-numeric loan field: amount={:?} rate={:?} years={:?}",
                    self.amount,
                    self.rate,
                    self.years
                );
                AmortisationSchedule::empty()
            }
        };
        self.schedule.emi
    }

    /// Clear the result. The form fields keep their values.
    pub fn reset(&mut self) {
        self.schedule = AmortisationSchedule::empty();
    }

    pub fn emi(&self) -> Option<Money> {
        self.schedule.emi
    }

    pub fn rows(&self) -> &[AmortisationRow] {
        &self.schedule.rows
    }

    pub fn schedule(&self) -> &AmortisationSchedule {
        &self.schedule
    }

    /// The result view is only shown once an EMI exists.
    pub fn has_result(&self) -> bool {
        self.schedule.emi.is_some()
    }

    /// `"USD 2051.65"`
    pub fn emi_display(&self) -> Option<String> {
        self.schedule
            .emi
            .map(|emi| format!("{} {}", self.currency, format_money(emi)))
    }

    pub fn formatted_rows(&self) -> Vec<FormattedRow> {
        let label = |amount: Money| format!("{} {}", format_money(amount), self.currency);
        self.schedule
            .rows
            .iter()
            .map(|row| FormattedRow {
                month: row.month,
                principal: label(row.principal),
                interest: label(row.interest),
                balance: label(row.balance),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_match_form() {
        let calc = LoanCalculator::new();
        assert_eq!(calc.amount(), "100000");
        assert_eq!(calc.rate(), "8.5");
        assert_eq!(calc.years(), "5");
        assert_eq!(calc.currency(), Currency::USD);
        assert!(!calc.has_result());
    }

    #[test]
    fn test_calculate_with_defaults() {
        let mut calc = LoanCalculator::new();
        let emi = calc.calculate().unwrap();
        assert_eq!(round_money(emi), dec!(2051.65));
        assert_eq!(calc.rows().len(), 60);
        assert_eq!(calc.emi_display().unwrap(), "USD 2051.65");
    }

    #[test]
    fn test_reset_keeps_inputs() {
        let mut calc = LoanCalculator::new();
        calc.set_amount("250000");
        calc.calculate();
        assert!(calc.has_result());

        calc.reset();
        assert!(!calc.has_result());
        assert!(calc.rows().is_empty());
        assert_eq!(calc.amount(), "250000");
        assert_eq!(calc.years(), "5");
    }

    #[test]
    fn test_invalid_text_clears_previous_result() {
        let mut calc = LoanCalculator::new();
        calc.calculate();
        assert!(calc.has_result());

        calc.set_rate("abc");
        assert_eq!(calc.calculate(), None);
        assert!(calc.rows().is_empty());

        calc.set_rate("");
        assert_eq!(calc.calculate(), None);
    }

    #[test]
    fn test_unrepresentable_amount_clears_result() {
        let mut calc = LoanCalculator::new();
        calc.calculate();
        calc.set_amount("70000000000000000000000000000");
        assert_eq!(calc.calculate(), None);
        assert!(!calc.has_result());
        assert!(calc.formatted_rows().is_empty());
    }

    #[test]
    fn test_scientific_notation_amount() {
        let mut calc = LoanCalculator::new();
        calc.set_amount("1e5");
        let emi = calc.calculate().unwrap();
        assert_eq!(round_money(emi), dec!(2051.65));
    }

    #[test]
    fn test_currency_relabels_without_conversion() {
        let mut calc = LoanCalculator::new();
        calc.calculate();
        let usd_emi = calc.emi();

        calc.set_currency(Currency::INR);
        assert_eq!(calc.emi(), usd_emi);
        assert_eq!(calc.emi_display().unwrap(), "INR 2051.65");

        let first = &calc.formatted_rows()[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.interest, "708.33 INR");
        assert_eq!(first.principal, "1343.32 INR");
        assert_eq!(first.balance, "98656.68 INR");
    }
}
