use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, Rate};
use crate::LoanCalcResult;

/// Months per year for monthly compounding.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual percentage (8.5 = 8.5%) into a monthly decimal rate.
pub fn monthly_rate(annual_rate_pct: Decimal) -> Rate {
    annual_rate_pct / Decimal::from(MONTHS_PER_YEAR) / dec!(100)
}

/// Unwrap a checked Decimal operation, naming what overflowed.
pub fn checked(value: Option<Decimal>, context: &str) -> LoanCalcResult<Decimal> {
    value.ok_or_else(|| LoanCalcError::Overflow {
        context: context.to_string(),
    })
}

/// Discount factor (1 + r)^-n.
///
/// Evaluated as (1 / (1 + r))^n so that a positive rate can never overflow,
/// however long the term.
pub fn discount_factor(rate: Rate, nper: u32) -> LoanCalcResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(LoanCalcError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = checked(Decimal::ONE.checked_add(rate), "discount factor base")?;
    let base = checked(Decimal::ONE.checked_div(one_plus_r), "discount factor base")?;
    base.checked_powi(i64::from(nper))
        .ok_or_else(|| LoanCalcError::DivisionByZero {
            context: format!("discount factor over {nper} periods"),
        })
}

/// Payment (PMT), spreadsheet sign convention: a positive present value
/// (money received) yields a negative payment.
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> LoanCalcResult<Money> {
    if nper == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        let total = checked(present_value.checked_add(future_value), "PMT principal")?;
        return Ok(-(total / Decimal::from(nper)));
    }

    let v = discount_factor(rate, nper)?;
    let annuity_denominator = Decimal::ONE - v;

    if annuity_denominator.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let discounted_fv = checked(future_value.checked_mul(v), "PMT future value")?;
    let principal = checked(present_value.checked_add(discounted_fv), "PMT principal")?;
    let periodic_interest = checked(principal.checked_mul(rate), "PMT interest")?;
    let payment = checked(
        periodic_interest.checked_div(annuity_denominator),
        "PMT annuity factor",
    )?;
    Ok(-payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_from_percent() {
        let r = monthly_rate(dec!(12));
        assert_eq!(r, dec!(0.01));
        let r = monthly_rate(dec!(8.5));
        assert!((r - dec!(0.0070833333)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_discount_factor_one_period() {
        let v = discount_factor(dec!(0.25), 1).unwrap();
        assert_eq!(v, dec!(0.8));
    }

    #[test]
    fn test_discount_factor_long_term_does_not_overflow() {
        // 1000% p.a. for 100 years would overflow (1 + r)^n
        let v = discount_factor(monthly_rate(dec!(1000)), 1200).unwrap();
        assert!(v >= Decimal::ZERO);
        assert!(v < dec!(0.0000001));
    }

    #[test]
    fn test_discount_factor_rejects_total_loss_rate() {
        assert!(discount_factor(dec!(-1), 5).is_err());
    }

    #[test]
    fn test_pmt_basic() {
        // Borrow 1000 at 10% over 2 periods: 576.19 per period
        let result = pmt(dec!(0.10), 2, dec!(1000), dec!(0)).unwrap();
        assert!((result - dec!(-576.19)).abs() < dec!(0.01));
    }

    #[test]
    fn test_pmt_zero_rate() {
        let result = pmt(dec!(0), 4, dec!(1000), dec!(0)).unwrap();
        assert_eq!(result, dec!(-250));
    }

    #[test]
    fn test_pmt_overflow_is_an_error() {
        // 1e28 per period on a near-maximal balance cannot be represented
        let result = pmt(dec!(10000000000000000000000000000), 1, Decimal::MAX, dec!(0));
        assert!(matches!(result, Err(LoanCalcError::Overflow { .. })));
    }

    #[test]
    fn test_checked_maps_none_to_overflow() {
        assert_eq!(checked(Some(dec!(1)), "x").unwrap(), dec!(1));
        assert!(matches!(
            checked(Decimal::MAX.checked_add(Decimal::ONE), "sum"),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_pmt_zero_periods_error() {
        assert!(pmt(dec!(0.05), 0, dec!(1000), dec!(0)).is_err());
    }
}
