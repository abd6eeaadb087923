use chrono::Utc;
use mortgage_mix_core::affordability::{self, WarningCode};
use mortgage_mix_core::types::{DealType, LoanInputs, PropertyType, RateSet};
use rust_decimal_macros::dec;

// ===========================================================================
// Affordability screen tests
// ===========================================================================

fn published_rates() -> RateSet {
    RateSet {
        prime: dec!(4.5),
        fixed_5_years: dec!(5.2),
        variable: dec!(3.8),
        last_updated: Utc::now(),
    }
}

fn first_home_buyer() -> LoanInputs {
    // A comfortably affordable first-home purchase
    LoanInputs {
        property_price: dec!(1_500_000),
        down_payment: dec!(400_000),
        monthly_income: dec!(25_000),
        deal_type: DealType::First,
        property_type: PropertyType::Apartment,
    }
}

#[test]
fn test_first_home_known_answer() {
    let output = affordability::evaluate(&first_home_buyer(), &published_rates()).unwrap();
    let r = &output.result;

    // loan = 1.5M - 400k
    assert_eq!(r.loan_amount, dec!(1_100_000));

    // screening rate = 5.2*0.6 + 3.8*0.4 = 4.64; annuity over 300 months
    // => payment ~6,202, i.e. ~24.8% of a 25k income
    assert!((r.monthly_payment - dec!(6202)).abs() <= dec!(2));
    assert_eq!(r.loan_to_value.round_dp(1), dec!(73.3));
    assert!(r.payment_to_income < dec!(35));

    // Below every threshold: exactly one informational finding
    assert_eq!(r.warnings.len(), 1);
    assert_eq!(r.warnings[0].code, WarningCode::LooksGood);
}

#[test]
fn test_result_carries_its_rate_snapshot() {
    let rates = published_rates();
    let output = affordability::evaluate(&first_home_buyer(), &rates).unwrap();
    assert_eq!(output.result.rates, rates);
}

#[test]
fn test_warning_list_length_bounds() {
    let cases = [
        // healthy
        first_home_buyer(),
        // one flag: upgrade deal at 72% financing
        LoanInputs {
            property_price: dec!(1_000_000),
            down_payment: dec!(280_000),
            monthly_income: dec!(30_000),
            deal_type: DealType::Upgrade,
            property_type: PropertyType::LandAndHouse,
        },
        // everything wrong at once
        LoanInputs {
            property_price: dec!(8_000_000),
            down_payment: dec!(100_000),
            monthly_income: dec!(5_000),
            deal_type: DealType::Investment,
            property_type: PropertyType::Land,
        },
    ];

    for inputs in cases {
        let output = affordability::evaluate(&inputs, &published_rates()).unwrap();
        let n = output.result.warnings.len();
        assert!((1..=3).contains(&n), "warning count {n} out of bounds");
    }
}

#[test]
fn test_looks_good_only_when_no_rule_fires() {
    let output = affordability::evaluate(&first_home_buyer(), &published_rates()).unwrap();
    let looks_good = output
        .result
        .warnings
        .iter()
        .filter(|w| w.code == WarningCode::LooksGood)
        .count();
    assert_eq!(looks_good, 1);

    let stretched = LoanInputs {
        down_payment: dec!(100_000),
        ..first_home_buyer()
    };
    let output = affordability::evaluate(&stretched, &published_rates()).unwrap();
    assert!(
        output
            .result
            .warnings
            .iter()
            .all(|w| w.code != WarningCode::LooksGood),
        "informational finding must not appear alongside red flags",
    );
}

#[test]
fn test_ltv_ceilings_per_deal_type() {
    // 73.3% financing: fine for a first home, over the 70% upgrade ceiling,
    // far over the 50% investment ceiling
    for (deal, flagged) in [
        (DealType::First, false),
        (DealType::Upgrade, true),
        (DealType::Investment, true),
    ] {
        let inputs = LoanInputs {
            deal_type: deal,
            monthly_income: dec!(40_000),
            ..first_home_buyer()
        };
        let output = affordability::evaluate(&inputs, &published_rates()).unwrap();
        let has_equity_flag = output
            .result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::InsufficientEquity);
        assert_eq!(has_equity_flag, flagged, "deal {deal:?}");
    }
}
