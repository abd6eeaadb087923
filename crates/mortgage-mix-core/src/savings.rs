//! Total-cost comparison between a chosen mix and the generic offer banks
//! quote by default.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization;
use crate::error::MortgageMixError;
use crate::mix::{self, MixId, MixInput, TrackWeights};
use crate::types::{with_metadata, ComputationOutput, Money, RateSet, DEFAULT_TERM_YEARS};
use crate::MortgageMixResult;

/// Track split of the generic offer banks quote by default.
pub const TYPICAL_BANK_WEIGHTS: TrackWeights = TrackWeights {
    fixed: dec!(80),
    variable: dec!(0),
    prime: dec!(20),
};

/// Input for the saving comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingInput {
    pub loan_amount: Money,
    pub selected_mix: MixId,
    #[serde(default = "default_term_years")]
    pub term_years: u32,
}

fn default_term_years() -> u32 {
    DEFAULT_TERM_YEARS
}

/// Signed total-cost delta against the generic bank offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingOutput {
    pub reference_total_cost: Money,
    pub selected_total_cost: Money,
    /// Negative when the selected mix costs more than the reference.
    pub saving: Money,
}

/// Total-term saving of the selected mix against the 80/20 reference blend,
/// both computed from the same rate snapshot.
pub fn potential_saving(
    input: &SavingInput,
    rates: &RateSet,
) -> MortgageMixResult<ComputationOutput<SavingOutput>> {
    let start = Instant::now();

    let mixes = mix::compose_mixes(
        &MixInput {
            loan_amount: input.loan_amount,
            term_years: input.term_years,
        },
        rates,
    )?;
    let selected = mixes
        .result
        .options
        .into_iter()
        .find(|o| o.id == input.selected_mix)
        .ok_or_else(|| MortgageMixError::InvalidInput {
            field: "selected_mix".into(),
            reason: "unknown mix id".into(),
        })?;

    let reference_rate = TYPICAL_BANK_WEIGHTS.weighted_rate(rates);
    let reference =
        amortization::loan_breakdown(input.loan_amount, reference_rate, input.term_years)?;

    Ok(with_metadata(
        "Total-cost delta vs a typical 80% fixed / 20% prime bank offer",
        input,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        SavingOutput {
            reference_total_cost: reference.total,
            selected_total_cost: selected.total_cost,
            saving: reference.total - selected.total_cost,
        },
    ))
}
