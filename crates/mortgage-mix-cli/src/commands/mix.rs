use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_mix_core::mix::{self, MixId, MixInput};
use mortgage_mix_core::savings::{self, SavingInput};
use mortgage_mix_core::types::DEFAULT_TERM_YEARS;

use crate::commands::rates::RateArgs;

#[derive(Debug, Clone, ValueEnum)]
pub enum MixArg {
    Stable,
    Balanced,
    Saving,
}

impl From<MixArg> for MixId {
    fn from(arg: MixArg) -> Self {
        match arg {
            MixArg::Stable => MixId::Stable,
            MixArg::Balanced => MixId::Balanced,
            MixArg::Saving => MixId::Saving,
        }
    }
}

#[derive(Args)]
pub struct MixesArgs {
    /// Loan amount
    #[arg(long)]
    pub loan: Decimal,

    /// Loan term in years
    #[arg(long, default_value_t = DEFAULT_TERM_YEARS)]
    pub term: u32,

    #[command(flatten)]
    pub rate_source: RateArgs,
}

#[derive(Args)]
pub struct SavingArgs {
    /// Loan amount
    #[arg(long)]
    pub loan: Decimal,

    /// Mix to compare against the generic bank offer
    #[arg(long, value_enum)]
    pub mix: MixArg,

    /// Loan term in years
    #[arg(long, default_value_t = DEFAULT_TERM_YEARS)]
    pub term: u32,

    #[command(flatten)]
    pub rate_source: RateArgs,
}

pub fn run_mixes(args: MixesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rates = args.rate_source.snapshot();
    let result = mix::compose_mixes(
        &MixInput {
            loan_amount: args.loan,
            term_years: args.term,
        },
        &rates,
    )?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_saving(args: SavingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rates = args.rate_source.snapshot();
    let result = savings::potential_saving(
        &SavingInput {
            loan_amount: args.loan,
            selected_mix: args.mix.into(),
            term_years: args.term,
        },
        &rates,
    )?;
    Ok(serde_json::to_value(result)?)
}
