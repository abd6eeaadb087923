//! Annuity amortization of a fixed-rate loan.
//!
//! All math in `rust_decimal::Decimal`; payments are rounded to the nearest
//! whole currency unit.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageMixError;
use crate::types::{Money, Percent};
use crate::MortgageMixResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Full cost breakdown of an amortizing loan. Derived, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanBreakdown {
    pub principal: Money,
    pub interest: Money,
    pub total: Money,
    pub monthly_payment: Money,
}

/// Monthly annuity payment: M = P * [r(1+r)^n] / [(1+r)^n - 1],
/// where r is the monthly rate and n the number of payments.
///
/// A zero rate amortizes linearly (P / n); the branch is explicit so the
/// annuity factor never divides by zero.
pub fn monthly_payment(
    principal: Money,
    annual_rate: Percent,
    term_years: u32,
) -> MortgageMixResult<Money> {
    validate(principal, annual_rate, term_years)?;

    let payments = Decimal::from(term_years * MONTHS_PER_YEAR);
    let monthly_rate = annual_rate / dec!(100) / Decimal::from(MONTHS_PER_YEAR);

    if monthly_rate.is_zero() {
        return Ok(round_currency(principal / payments));
    }

    let growth = (Decimal::ONE + monthly_rate).powd(payments);
    let annuity_factor = growth - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Err(MortgageMixError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    let payment = principal * (monthly_rate * growth) / annuity_factor;
    Ok(round_currency(payment))
}

/// Payment plus the total and interest cost over the full term.
pub fn loan_breakdown(
    principal: Money,
    annual_rate: Percent,
    term_years: u32,
) -> MortgageMixResult<LoanBreakdown> {
    let payment = monthly_payment(principal, annual_rate, term_years)?;
    let total = payment * Decimal::from(term_years * MONTHS_PER_YEAR);

    Ok(LoanBreakdown {
        principal,
        interest: total - principal,
        total,
        monthly_payment: payment,
    })
}

fn validate(principal: Money, annual_rate: Percent, term_years: u32) -> MortgageMixResult<()> {
    if principal <= Decimal::ZERO {
        return Err(MortgageMixError::InvalidInput {
            field: "principal".into(),
            reason: "principal must be > 0".into(),
        });
    }
    if term_years == 0 {
        return Err(MortgageMixError::InvalidInput {
            field: "term_years".into(),
            reason: "term must be > 0".into(),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(MortgageMixError::InvalidInput {
            field: "annual_rate".into(),
            reason: "annual rate must be >= 0".into(),
        });
    }
    Ok(())
}

/// Round to the nearest whole currency unit, midpoint away from zero.
pub(crate) fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_payment_known_answer() {
        // 1.1M at 4.64% over 25 years: annuity factor ~177.37 => ~6,202/month
        let payment = monthly_payment(dec!(1_100_000), dec!(4.64), 25).unwrap();
        assert!(
            (payment - dec!(6202)).abs() <= dec!(2),
            "expected ~6202, got {payment}",
        );
    }

    #[test]
    fn test_zero_rate_amortizes_linearly() {
        // 300,000 over 25 years at 0% = exactly 1,000/month
        let payment = monthly_payment(dec!(300_000), dec!(0), 25).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_total_never_below_principal() {
        for rate in [dec!(0), dec!(0.5), dec!(3.8), dec!(5.2), dec!(12)] {
            let b = loan_breakdown(dec!(750_000), rate, 20).unwrap();
            assert!(
                b.total >= b.principal,
                "total {} fell below principal at rate {rate}",
                b.total,
            );
        }
    }

    #[test]
    fn test_positive_rate_costs_interest() {
        let b = loan_breakdown(dec!(1_000_000), dec!(5.06), 25).unwrap();
        assert!(b.interest > Decimal::ZERO);
        assert_eq!(b.total, b.monthly_payment * dec!(300));
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let err = monthly_payment(dec!(0), dec!(5), 25).unwrap_err();
        assert!(matches!(err, MortgageMixError::InvalidInput { .. }));
        let err = monthly_payment(dec!(-100), dec!(5), 25).unwrap_err();
        assert!(matches!(err, MortgageMixError::InvalidInput { .. }));
    }

    #[test]
    fn test_rejects_zero_term() {
        let err = monthly_payment(dec!(100_000), dec!(5), 0).unwrap_err();
        assert!(matches!(err, MortgageMixError::InvalidInput { .. }));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = monthly_payment(dec!(100_000), dec!(-1), 25).unwrap_err();
        assert!(matches!(err, MortgageMixError::InvalidInput { .. }));
    }

    #[test]
    fn test_payment_is_whole_units() {
        let payment = monthly_payment(dec!(1_234_567), dec!(4.31), 17).unwrap();
        assert_eq!(payment, payment.trunc());
    }
}
