use clap::Args;
use serde_json::Value;
use std::time::Duration;

use mortgage_mix_core::rates::{self, HttpRateSource, DEFAULT_FEED_URL};
use mortgage_mix_core::types::RateSet;

/// Rate-source options shared by every command that needs a snapshot.
#[derive(Args)]
pub struct RateArgs {
    /// URL of the published rate feed
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub rates_url: String,

    /// Skip the fetch and use the documented fallback rates
    #[arg(long)]
    pub offline: bool,

    /// Fetch timeout in seconds
    #[arg(long, default_value = "5")]
    pub timeout: u64,
}

impl RateArgs {
    /// One rate snapshot for the whole command invocation.
    pub fn snapshot(&self) -> RateSet {
        if self.offline {
            return rates::fallback_rates();
        }
        let source = HttpRateSource::with_timeout(
            self.rates_url.as_str(),
            Duration::from_secs(self.timeout),
        );
        rates::current_rates(&source)
    }
}

#[derive(Args)]
pub struct RatesArgs {
    #[command(flatten)]
    pub rate_source: RateArgs,
}

pub fn run_rates(args: RatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rates = args.rate_source.snapshot();
    Ok(serde_json::to_value(rates)?)
}
