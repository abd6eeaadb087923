//! Current lending rates from the central-bank feed, with a deterministic
//! fallback when the feed cannot be read.
//!
//! The feed publishes either a bare `{ "currentInterest": ... }` object or a
//! list of named rate records; both shapes are reduced to a [`RateSet`] by
//! fixed per-track spreads.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
#[cfg(feature = "fetch")]
use std::time::Duration;

use crate::types::RateSet;
#[cfg(feature = "fetch")]
use crate::MortgageMixError;
use crate::MortgageMixResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Published feed for current interest rates.
pub const DEFAULT_FEED_URL: &str = "https://www.boi.org.il/PublicApi/GetInterest";

/// Rates used whenever the feed cannot be read at all.
pub const FALLBACK_PRIME: Decimal = dec!(4.5);
pub const FALLBACK_FIXED_5_YEARS: Decimal = dec!(5.2);
pub const FALLBACK_VARIABLE: Decimal = dec!(3.8);

/// Spread of each lending track over the published base rate.
///
/// The feed does not publish per-track detail; these offsets are the
/// long-standing substitute for it, carried over as-is.
pub const PRIME_SPREAD: Decimal = dec!(1.5);
pub const FIXED_5_YEARS_SPREAD: Decimal = dec!(1.2);
pub const VARIABLE_SPREAD: Decimal = dec!(-0.3);

/// Per-track defaults when a named record is missing from a list payload.
const DEFAULT_PRIME: Decimal = dec!(6);
const DEFAULT_FIXED_5_YEARS: Decimal = dec!(5.7);
const DEFAULT_VARIABLE: Decimal = dec!(4.2);

/// Record-name fragments that locate each track in a list payload.
const PRIME_NAME: &str = "ריבית פריים בנק ישראל";
const FIXED_5_YEARS_NAME: &str = "קבועה 5 שנים";
const VARIABLE_NAME: &str = "משתנה";

// ---------------------------------------------------------------------------
// Payload shapes
// ---------------------------------------------------------------------------

/// The two payload shapes the feed is known to return.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatePayload {
    /// A list of named rate records.
    Records(Vec<RateRecord>),
    /// A single object carrying one base rate.
    Scalar(ScalarRate),
}

/// One named record from a list payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RateRecord {
    #[serde(rename = "InterestRateName")]
    pub name: String,
    #[serde(rename = "currentInterest")]
    pub current_interest: Option<Decimal>,
}

/// A bare base-rate payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalarRate {
    #[serde(rename = "currentInterest")]
    pub current_interest: Decimal,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Source of the raw rate payload. Implementations own the actual I/O.
pub trait RateSource {
    fn fetch(&self) -> MortgageMixResult<RatePayload>;
}

/// Fetches the published payload over HTTP with a bounded timeout.
///
/// One GET per call; there is no caching or retry here. Timeouts,
/// non-success statuses and malformed bodies all surface as
/// `MortgageMixError::RateFetch` for [`current_rates`] to absorb.
#[cfg(feature = "fetch")]
pub struct HttpRateSource {
    url: String,
    timeout: Duration,
}

#[cfg(feature = "fetch")]
impl HttpRateSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

#[cfg(feature = "fetch")]
impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

#[cfg(feature = "fetch")]
impl RateSource for HttpRateSource {
    fn fetch(&self) -> MortgageMixResult<RatePayload> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(MortgageMixError::RateFetch(format!(
                "feed returned {}",
                response.status()
            )));
        }

        Ok(response.json()?)
    }
}

// ---------------------------------------------------------------------------
// Rate derivation
// ---------------------------------------------------------------------------

/// Current rates from the given source. Never fails: any retrieval or parse
/// error is logged and replaced by [`fallback_rates`].
pub fn current_rates(source: &impl RateSource) -> RateSet {
    match source.fetch() {
        Ok(payload) => rates_from_payload(&payload),
        Err(e) => {
            log::warn!("rate fetch failed, using fallback rates: {e}");
            fallback_rates()
        }
    }
}

/// The documented fallback triple, stamped now.
pub fn fallback_rates() -> RateSet {
    RateSet {
        prime: FALLBACK_PRIME,
        fixed_5_years: FALLBACK_FIXED_5_YEARS,
        variable: FALLBACK_VARIABLE,
        last_updated: Utc::now(),
    }
}

/// Derive the three lending tracks from a feed payload.
pub fn rates_from_payload(payload: &RatePayload) -> RateSet {
    match payload {
        RatePayload::Scalar(scalar) => RateSet {
            prime: scalar.current_interest + PRIME_SPREAD,
            fixed_5_years: scalar.current_interest + FIXED_5_YEARS_SPREAD,
            variable: scalar.current_interest + VARIABLE_SPREAD,
            last_updated: Utc::now(),
        },
        RatePayload::Records(records) => {
            let track = |fragment: &str| {
                records
                    .iter()
                    .find(|r| r.name.contains(fragment))
                    .and_then(|r| r.current_interest)
            };

            RateSet {
                prime: track(PRIME_NAME)
                    .map(|r| r + PRIME_SPREAD)
                    .unwrap_or(DEFAULT_PRIME),
                fixed_5_years: track(FIXED_5_YEARS_NAME)
                    .map(|r| r + FIXED_5_YEARS_SPREAD)
                    .unwrap_or(DEFAULT_FIXED_5_YEARS),
                variable: track(VARIABLE_NAME)
                    .map(|r| r + VARIABLE_SPREAD)
                    .unwrap_or(DEFAULT_VARIABLE),
                last_updated: Utc::now(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingSource;

    impl RateSource for FailingSource {
        fn fetch(&self) -> MortgageMixResult<RatePayload> {
            Err(crate::MortgageMixError::RateFetch("connection refused".into()))
        }
    }

    struct StaticSource(&'static str);

    impl RateSource for StaticSource {
        fn fetch(&self) -> MortgageMixResult<RatePayload> {
            Ok(serde_json::from_str(self.0)?)
        }
    }

    #[test]
    fn test_failing_source_yields_fallback_triple() {
        let rates = current_rates(&FailingSource);
        assert_eq!(rates.prime, dec!(4.5));
        assert_eq!(rates.fixed_5_years, dec!(5.2));
        assert_eq!(rates.variable, dec!(3.8));
    }

    #[test]
    fn test_scalar_payload_applies_spreads() {
        let rates = current_rates(&StaticSource(r#"{"currentInterest": 4.0, "fallback": true}"#));
        assert_eq!(rates.prime, dec!(5.5));
        assert_eq!(rates.fixed_5_years, dec!(5.2));
        assert_eq!(rates.variable, dec!(3.7));
    }

    #[test]
    fn test_list_payload_matches_by_name_fragment() {
        let json = r#"[
            {"InterestRateName": "ריבית פריים בנק ישראל", "currentInterest": 6.0},
            {"InterestRateName": "ריבית קבועה 5 שנים לא צמודה", "currentInterest": 4.8},
            {"InterestRateName": "ריבית משתנה צמודת מדד", "currentInterest": 3.9}
        ]"#;
        let rates = current_rates(&StaticSource(json));
        assert_eq!(rates.prime, dec!(7.5));
        assert_eq!(rates.fixed_5_years, dec!(6.0));
        assert_eq!(rates.variable, dec!(3.6));
    }

    #[test]
    fn test_missing_records_take_per_track_defaults() {
        let json = r#"[{"InterestRateName": "ריבית אחרת", "currentInterest": 2.0}]"#;
        let rates = current_rates(&StaticSource(json));
        assert_eq!(rates.prime, dec!(6));
        assert_eq!(rates.fixed_5_years, dec!(5.7));
        assert_eq!(rates.variable, dec!(4.2));
    }

    #[test]
    fn test_record_without_rate_takes_default() {
        let json = r#"[{"InterestRateName": "ריבית פריים בנק ישראל"}]"#;
        let rates = current_rates(&StaticSource(json));
        assert_eq!(rates.prime, dec!(6));
    }

    #[test]
    fn test_malformed_payload_yields_fallback() {
        let rates = current_rates(&StaticSource(r#"{"unexpected": "shape"}"#));
        assert_eq!(rates.prime, dec!(4.5));
        assert_eq!(rates.fixed_5_years, dec!(5.2));
        assert_eq!(rates.variable, dec!(3.8));
    }
}
