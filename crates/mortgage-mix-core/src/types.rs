use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates in percent, as the published feed quotes them (5.2 = 5.2%).
pub type Percent = Decimal;

/// Loan term used throughout when the caller does not choose one.
pub const DEFAULT_TERM_YEARS: u32 = 25;

/// Deal classification, which sets the regulatory financing ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealType {
    First,
    Upgrade,
    Investment,
}

impl DealType {
    /// Regulatory loan-to-value ceiling for this deal type, in percent.
    pub fn ltv_ceiling(&self) -> Percent {
        match self {
            DealType::First => dec!(75),
            DealType::Upgrade => dec!(70),
            DealType::Investment => dec!(50),
        }
    }
}

/// Property classification, carried through from the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Apartment,
    LandAndHouse,
    Land,
}

/// One user submission. Immutable snapshot; a new submission makes a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInputs {
    pub property_price: Money,
    pub down_payment: Money,
    pub monthly_income: Money,
    pub deal_type: DealType,
    pub property_type: PropertyType,
}

/// Current annual rates for the three lending tracks.
///
/// Treated as a read-only snapshot: every sub-calculation of one request
/// must see the same `RateSet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSet {
    pub prime: Percent,
    pub fixed_5_years: Percent,
    pub variable: Percent,
    pub last_updated: DateTime<Utc>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Whole-unit amount with thousands separators, for advisory messages.
pub fn format_money(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}
