use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One domestic gold quote as published by a dealer network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldQuote {
    /// Dealer name, e.g. "SJC", "DOJI", "PNJ"
    pub source: String,
    /// Price the dealer pays, VND per tael
    pub buy: Decimal,
    /// Price the dealer charges, VND per tael
    pub sell: Decimal,
}

impl GoldQuote {
    pub fn new(source: impl Into<String>, buy: i64, sell: i64) -> Self {
        Self {
            source: source.into(),
            buy: Decimal::from(buy),
            sell: Decimal::from(sell),
        }
    }

    /// Dealer spread in VND (sell minus buy)
    pub fn spread(&self) -> Decimal {
        self.sell - self.buy
    }
}

/// World gold price snapshot (USD per troy ounce)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGold {
    pub price_usd: Decimal,
    /// Absolute 24h change in USD
    pub change_24h: f64,
    /// 24h change in percent
    pub change_percent: f64,
}

impl WorldGold {
    /// Documented fallback when the upstream feed is unreachable
    pub fn fallback() -> Self {
        Self {
            price_usd: Decimal::from(2650),
            change_24h: 0.0,
            change_percent: 0.0,
        }
    }
}

/// USD/VND exchange rate snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxRate {
    /// VND per USD
    pub rate: Decimal,
    pub last_updated: DateTime<Utc>,
    /// Which upstream produced the rate ("nyfed", "exchangerate-api", "fallback")
    pub source: String,
}

/// One central-bank liquidity swap operation.
///
/// Field names follow the NY Fed fxs dataset shape so the simulated book
/// round-trips through the same serde definitions a live feed would use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOperation {
    pub operation_type: String,
    pub counterparty: String,
    pub currency: String,
    pub term_in_days: u32,
    pub amount: u64,
    pub interest_rate: f64,
    pub is_small_value: bool,
}

/// Market sentiment proxy in [0, 1]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentiment {
    pub overall_score: f64,
    pub direction: SentimentDirection,
    pub confidence: f64,
    pub factors: HashMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentDirection {
    Bullish,
    Bearish,
    Neutral,
}

/// Liquidity proxy metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liquidity {
    pub overall_score: f64,
    pub bid_ask_spread: f64,
    pub market_depth: f64,
    /// Daily traded volume estimate in VND
    pub trading_volume: f64,
}

/// One complete observation cycle. Assembled by the collector, never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub timestamp: DateTime<Utc>,
    pub quotes: Vec<GoldQuote>,
    pub world_gold: WorldGold,
    pub fx: FxRate,
    pub swaps: Vec<SwapOperation>,
    pub sentiment: Sentiment,
    pub volatility_index: f64,
    pub liquidity: Liquidity,
}

/// Error types for feed retrieval
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response from {provider}: {detail}")]
    InvalidResponse { provider: String, detail: String },

    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
