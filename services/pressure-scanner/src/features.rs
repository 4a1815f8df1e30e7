//! Feature extraction
//!
//! Turns one immutable snapshot into the fixed-order numeric vector the
//! scorers consume. Pure and deterministic; the only failure is a
//! structurally invalid quote entry.

use market_data::types::MarketSnapshot;
use rust_decimal::prelude::ToPrimitive;

use crate::settings::Heuristics;

/// The scan core's own error type. Feed outages never reach here; a
/// malformed snapshot is a contract violation by the provider and is not
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Fixed-order feature vector, scoped to a single scoring pass.
///
/// Order: reference price, reference price in millions, world price,
/// world 24h change percent, FX rate, sentiment score, sentiment
/// confidence, volatility index, liquidity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; 9]);

impl FeatureVector {
    pub fn reference_price(&self) -> f64 {
        self.0[0]
    }

    pub fn reference_price_millions(&self) -> f64 {
        self.0[1]
    }

    pub fn world_price(&self) -> f64 {
        self.0[2]
    }

    pub fn world_change_percent(&self) -> f64 {
        self.0[3]
    }

    pub fn fx_rate(&self) -> f64 {
        self.0[4]
    }

    pub fn sentiment(&self) -> f64 {
        self.0[5]
    }

    pub fn sentiment_confidence(&self) -> f64 {
        self.0[6]
    }

    pub fn volatility(&self) -> f64 {
        self.0[7]
    }

    pub fn liquidity(&self) -> f64 {
        self.0[8]
    }

    pub fn as_array(&self) -> &[f64; 9] {
        &self.0
    }
}

/// Extract the feature vector from a snapshot.
///
/// The reference quote is the first entry matching the configured dealer
/// name; when absent the configured default price stands in, so an empty
/// quote list is not an error.
pub fn extract(
    snapshot: &MarketSnapshot,
    heuristics: &Heuristics,
) -> Result<FeatureVector, ScanError> {
    for (i, quote) in snapshot.quotes.iter().enumerate() {
        if quote.source.trim().is_empty() {
            return Err(ScanError::MalformedSnapshot(format!(
                "quote {} has an empty source name",
                i
            )));
        }
        if quote.buy.is_sign_negative()
            || quote.sell.is_sign_negative()
            || quote.buy.is_zero()
            || quote.sell.is_zero()
        {
            return Err(ScanError::MalformedSnapshot(format!(
                "quote {} ({}) has a non-positive price",
                i, quote.source
            )));
        }
    }

    let reference_price = snapshot
        .quotes
        .iter()
        .find(|q| q.source == heuristics.reference_source)
        .and_then(|q| q.buy.to_f64())
        .unwrap_or(heuristics.default_reference_price);

    let world_price = snapshot
        .world_gold
        .price_usd
        .to_f64()
        .unwrap_or(0.0);
    let fx_rate = snapshot.fx.rate.to_f64().unwrap_or(0.0);

    Ok(FeatureVector([
        reference_price,
        reference_price / 1e6,
        world_price,
        snapshot.world_gold.change_percent,
        fx_rate,
        snapshot.sentiment.overall_score,
        snapshot.sentiment.confidence,
        snapshot.volatility_index,
        snapshot.liquidity.overall_score,
    ]))
}
