//! Weighted-rate mix scenarios for splitting a loan across the fixed,
//! variable and prime tracks.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization;
use crate::error::MortgageMixError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, RateSet, DEFAULT_TERM_YEARS};
use crate::MortgageMixResult;

// ---------------------------------------------------------------------------
// Mix profiles
// ---------------------------------------------------------------------------

/// Identifier for each offered mix, in ascending order of volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixId {
    Stable,
    Balanced,
    Saving,
}

/// How exposed a mix is to rate movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

/// Percentage split of a loan across the three rate tracks. Sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackWeights {
    pub fixed: Decimal,
    pub variable: Decimal,
    pub prime: Decimal,
}

impl TrackWeights {
    pub fn total(&self) -> Decimal {
        self.fixed + self.variable + self.prime
    }

    /// Effective annual rate of this split under the given rates.
    pub fn weighted_rate(&self, rates: &RateSet) -> Percent {
        (self.fixed * rates.fixed_5_years
            + self.variable * rates.variable
            + self.prime * rates.prime)
            / dec!(100)
    }
}

/// Static profile of one offered mix.
#[derive(Debug, Clone, Copy)]
pub struct MixProfile {
    pub id: MixId,
    pub weights: TrackWeights,
    pub volatility: Volatility,
    pub recommended: bool,
}

/// The three offered mixes, in presentation order.
///
/// The weightings are a product decision, not derived values; changing the
/// offering means changing this table and nothing else.
pub const MIX_TABLE: [MixProfile; 3] = [
    MixProfile {
        id: MixId::Stable,
        weights: TrackWeights {
            fixed: dec!(50),
            variable: dec!(30),
            prime: dec!(20),
        },
        volatility: Volatility::Low,
        recommended: false,
    },
    MixProfile {
        id: MixId::Balanced,
        weights: TrackWeights {
            fixed: dec!(40),
            variable: dec!(20),
            prime: dec!(40),
        },
        volatility: Volatility::Medium,
        recommended: true,
    },
    MixProfile {
        id: MixId::Saving,
        weights: TrackWeights {
            fixed: dec!(30),
            variable: dec!(20),
            prime: dec!(50),
        },
        volatility: Volatility::High,
        recommended: false,
    },
];

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Input for mix composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixInput {
    pub loan_amount: Money,
    #[serde(default = "default_term_years")]
    pub term_years: u32,
}

fn default_term_years() -> u32 {
    DEFAULT_TERM_YEARS
}

/// One computed mix scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixOption {
    pub id: MixId,
    pub composition: TrackWeights,
    pub annual_rate: Percent,
    pub monthly_payment: Money,
    pub total_cost: Money,
    pub volatility: Volatility,
    pub recommended: bool,
}

/// Output of [`compose_mixes`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixOutput {
    pub options: Vec<MixOption>,
}

/// Compute every offered mix for a loan under one rate snapshot.
///
/// Options come back in [`MIX_TABLE`] order: stable, balanced, saving.
pub fn compose_mixes(
    input: &MixInput,
    rates: &RateSet,
) -> MortgageMixResult<ComputationOutput<MixOutput>> {
    let start = Instant::now();

    if input.loan_amount <= Decimal::ZERO {
        return Err(MortgageMixError::InvalidInput {
            field: "loan_amount".into(),
            reason: "loan amount must be > 0".into(),
        });
    }

    let options = MIX_TABLE
        .iter()
        .map(|profile| {
            let annual_rate = profile.weights.weighted_rate(rates);
            let breakdown =
                amortization::loan_breakdown(input.loan_amount, annual_rate, input.term_years)?;

            Ok(MixOption {
                id: profile.id,
                composition: profile.weights,
                annual_rate,
                monthly_payment: breakdown.monthly_payment,
                total_cost: breakdown.total,
                volatility: profile.volatility,
                recommended: profile.recommended,
            })
        })
        .collect::<MortgageMixResult<Vec<_>>>()?;

    Ok(with_metadata(
        "Weighted-rate mix scenarios, annuity amortization per track split",
        input,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        MixOutput { options },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::fallback_rates;
    use rust_decimal_macros::dec;

    #[test]
    fn test_every_profile_sums_to_100() {
        for profile in &MIX_TABLE {
            assert_eq!(
                profile.weights.total(),
                dec!(100),
                "{:?} weights do not sum to 100",
                profile.id,
            );
        }
    }

    #[test]
    fn test_fixed_order_and_recommendation() {
        let input = MixInput {
            loan_amount: dec!(1_000_000),
            term_years: 25,
        };
        let output = compose_mixes(&input, &fallback_rates()).unwrap();
        let ids: Vec<MixId> = output.result.options.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![MixId::Stable, MixId::Balanced, MixId::Saving]);

        let recommended: Vec<MixId> = output
            .result
            .options
            .iter()
            .filter(|o| o.recommended)
            .map(|o| o.id)
            .collect();
        assert_eq!(recommended, vec![MixId::Balanced]);
    }

    #[test]
    fn test_weighted_rates_under_fallback_snapshot() {
        // fixed 5.2, variable 3.8, prime 4.5
        let rates = fallback_rates();
        let by_id = |id: MixId| {
            MIX_TABLE
                .iter()
                .find(|p| p.id == id)
                .unwrap()
                .weights
                .weighted_rate(&rates)
        };
        // stable: 0.5*5.2 + 0.3*3.8 + 0.2*4.5 = 4.64
        assert_eq!(by_id(MixId::Stable), dec!(4.64));
        // balanced: 0.4*5.2 + 0.2*3.8 + 0.4*4.5 = 4.64
        assert_eq!(by_id(MixId::Balanced), dec!(4.64));
        // saving: 0.3*5.2 + 0.2*3.8 + 0.5*4.5 = 4.57
        assert_eq!(by_id(MixId::Saving), dec!(4.57));
    }

    #[test]
    fn test_volatility_tracks_prime_exposure() {
        let primes: Vec<Decimal> = MIX_TABLE.iter().map(|p| p.weights.prime).collect();
        assert!(primes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_total_cost_is_payment_times_term() {
        let input = MixInput {
            loan_amount: dec!(800_000),
            term_years: 20,
        };
        let output = compose_mixes(&input, &fallback_rates()).unwrap();
        for option in &output.result.options {
            assert_eq!(option.total_cost, option.monthly_payment * dec!(240));
        }
    }

    #[test]
    fn test_rejects_non_positive_loan() {
        let input = MixInput {
            loan_amount: dec!(0),
            term_years: 25,
        };
        let err = compose_mixes(&input, &fallback_rates()).unwrap_err();
        assert!(matches!(err, MortgageMixError::InvalidInput { .. }));
    }
}
