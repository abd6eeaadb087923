use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_mix_core::affordability;
use mortgage_mix_core::types::{DealType, LoanInputs, PropertyType};

use crate::commands::rates::RateArgs;
use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum DealArg {
    First,
    Upgrade,
    Investment,
}

impl From<DealArg> for DealType {
    fn from(arg: DealArg) -> Self {
        match arg {
            DealArg::First => DealType::First,
            DealArg::Upgrade => DealType::Upgrade,
            DealArg::Investment => DealType::Investment,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum PropertyArg {
    Apartment,
    LandAndHouse,
    Land,
}

impl From<PropertyArg> for PropertyType {
    fn from(arg: PropertyArg) -> Self {
        match arg {
            PropertyArg::Apartment => PropertyType::Apartment,
            PropertyArg::LandAndHouse => PropertyType::LandAndHouse,
            PropertyArg::Land => PropertyType::Land,
        }
    }
}

#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to a JSON file with the loan inputs
    #[arg(long)]
    pub input: Option<String>,

    /// Property price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment (equity)
    #[arg(long)]
    pub down: Option<Decimal>,

    /// Net monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Deal type
    #[arg(long, value_enum)]
    pub deal: Option<DealArg>,

    /// Property type
    #[arg(long, value_enum, default_value = "apartment")]
    pub property_type: PropertyArg,

    #[command(flatten)]
    pub rate_source: RateArgs,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: LoanInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        match (args.price, args.down, args.income, args.deal) {
            (Some(price), Some(down), Some(income), Some(deal)) => LoanInputs {
                property_price: price,
                down_payment: down,
                monthly_income: income,
                deal_type: deal.into(),
                property_type: args.property_type.into(),
            },
            _ => {
                return Err(
                    "--input <file.json>, piped stdin, or all of --price/--down/--income/--deal \
                     required"
                        .into(),
                )
            }
        }
    };

    let rates = args.rate_source.snapshot();
    let result = affordability::evaluate(&inputs, &rates)?;
    Ok(serde_json::to_value(result)?)
}
