//! Affordability screening: loan-to-value and payment-to-income ratios plus
//! an ordered set of red-flag rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization;
use crate::error::MortgageMixError;
use crate::types::{
    format_money, with_metadata, ComputationOutput, DealType, LoanInputs, Money, Percent, RateSet,
    DEFAULT_TERM_YEARS,
};
use crate::MortgageMixResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Blend of the fixed and variable tracks used for the screening rate.
/// Distinct from the mix table: this approximates a typical drawn loan.
pub const SCREENING_FIXED_WEIGHT: Decimal = dec!(0.6);
pub const SCREENING_VARIABLE_WEIGHT: Decimal = dec!(0.4);

/// Highest payment-to-income ratio banks will typically approve, in percent.
pub const MAX_PAYMENT_TO_INCOME: Decimal = dec!(35);

/// Loan size above which blended bank/non-bank financing becomes likely.
pub const LARGE_LOAN_THRESHOLD: Decimal = dec!(2_000_000);

/// At most this many findings are surfaced, in rule order.
pub const MAX_WARNINGS: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Machine-readable finding codes, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    InsufficientEquity,
    PaymentTooHigh,
    LargeLoan,
    IncomeTooLow,
    InvestmentEquityFloor,
    LooksGood,
}

/// One affordability finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityWarning {
    pub code: WarningCode,
    pub message: String,
}

/// Result of one affordability screen. Created fresh per calculation and
/// never mutated; carries the rate snapshot it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub loan_to_value: Percent,
    pub payment_to_income: Percent,
    pub warnings: Vec<AffordabilityWarning>,
    pub rates: RateSet,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Screen a loan for affordability red flags under one rate snapshot.
///
/// Pure function of (inputs, rates): the same submission against the same
/// snapshot always yields the same findings.
pub fn evaluate(
    inputs: &LoanInputs,
    rates: &RateSet,
) -> MortgageMixResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    validate(inputs)?;

    let loan_amount = inputs.property_price - inputs.down_payment;
    let average_rate = rates.fixed_5_years * SCREENING_FIXED_WEIGHT
        + rates.variable * SCREENING_VARIABLE_WEIGHT;
    let monthly_payment =
        amortization::monthly_payment(loan_amount, average_rate, DEFAULT_TERM_YEARS)?;
    let loan_to_value = loan_amount / inputs.property_price * dec!(100);
    let payment_to_income = monthly_payment / inputs.monthly_income * dec!(100);

    let mut warnings: Vec<AffordabilityWarning> = Vec::new();

    // Rule 1: equity below the deal-type ceiling
    let ceiling = inputs.deal_type.ltv_ceiling();
    if loan_to_value > ceiling {
        let shortfall = inputs.property_price * ceiling / dec!(100) - inputs.down_payment;
        warnings.push(AffordabilityWarning {
            code: WarningCode::InsufficientEquity,
            message: format!(
                "Insufficient equity: financing is capped at {ceiling}% of the property \
                 (currently {}% equity). You are short {}",
                (dec!(100) - loan_to_value).round_dp(1),
                format_money(shortfall),
            ),
        });
    }

    // Rule 2: payment too high relative to income
    if payment_to_income > MAX_PAYMENT_TO_INCOME {
        warnings.push(AffordabilityWarning {
            code: WarningCode::PaymentTooHigh,
            message: format!(
                "Monthly payment is {}% of income; banks typically approve up to \
                 {MAX_PAYMENT_TO_INCOME}%. Consider more equity or a cheaper property",
                payment_to_income.round_dp(1),
            ),
        });
    }

    // Rule 3: very large loan
    if loan_amount > LARGE_LOAN_THRESHOLD {
        warnings.push(AffordabilityWarning {
            code: WarningCode::LargeLoan,
            message: format!(
                "Loan above {} may require blended financing: a bank tranche plus a \
                 non-bank tranche at different rates",
                format_money(LARGE_LOAN_THRESHOLD),
            ),
        });
    }

    // Rule 4: income low for the property
    let recommended_income = monthly_payment / (MAX_PAYMENT_TO_INCOME / dec!(100));
    if inputs.monthly_income < recommended_income {
        warnings.push(AffordabilityWarning {
            code: WarningCode::IncomeTooLow,
            message: format!(
                "Monthly income is low for this property; at least {} is recommended",
                format_money(recommended_income),
            ),
        });
    }

    // Rule 5: investment deal with high financing
    if inputs.deal_type == DealType::Investment && loan_to_value > DealType::Investment.ltv_ceiling()
    {
        warnings.push(AffordabilityWarning {
            code: WarningCode::InvestmentEquityFloor,
            message: "Investment properties require at least 50% equity under central-bank \
                      regulations"
                .to_string(),
        });
    }

    if warnings.is_empty() {
        warnings.push(AffordabilityWarning {
            code: WarningCode::LooksGood,
            message: "Looks good: the figures are within standard lending criteria".to_string(),
        });
    } else {
        warnings.truncate(MAX_WARNINGS);
    }

    Ok(with_metadata(
        "Affordability screen: 60/40 fixed/variable blend, 25-year annuity",
        inputs,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        AffordabilityOutput {
            loan_amount,
            monthly_payment,
            loan_to_value,
            payment_to_income,
            warnings,
            rates: rates.clone(),
        },
    ))
}

fn validate(inputs: &LoanInputs) -> MortgageMixResult<()> {
    if inputs.property_price <= Decimal::ZERO {
        return Err(MortgageMixError::InvalidInput {
            field: "property_price".into(),
            reason: "property price must be > 0".into(),
        });
    }
    if inputs.down_payment < Decimal::ZERO {
        return Err(MortgageMixError::InvalidInput {
            field: "down_payment".into(),
            reason: "down payment must be >= 0".into(),
        });
    }
    if inputs.down_payment >= inputs.property_price {
        return Err(MortgageMixError::InvalidInput {
            field: "down_payment".into(),
            reason: "down payment must be below the property price".into(),
        });
    }
    if inputs.monthly_income <= Decimal::ZERO {
        return Err(MortgageMixError::InvalidInput {
            field: "monthly_income".into(),
            reason: "monthly income must be > 0".into(),
        });
    }
    Ok(())
}
