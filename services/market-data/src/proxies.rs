//! Simulated sentiment and liquidity proxies
//!
//! There is no live sentiment or order-book feed for the domestic gold
//! market, so these are random stand-ins with the same shape and bounds a
//! real feed would have.

use rand::Rng;
use std::collections::HashMap;

use crate::types::{Liquidity, Sentiment, SentimentDirection};

const SENTIMENT_FACTORS: [&str; 4] = ["fear", "greed", "uncertainty", "confidence"];

/// Sentiment score centered on 0.5. The average of three uniform draws
/// approximates the normal(0.5, 0.2) draw of a survey-style index.
pub fn simulate_sentiment<R: Rng>(rng: &mut R) -> Sentiment {
    let base: f64 =
        (rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>()) / 3.0;
    let overall_score = base.clamp(0.0, 1.0);

    let direction = if overall_score > 0.6 {
        SentimentDirection::Bullish
    } else if overall_score < 0.4 {
        SentimentDirection::Bearish
    } else {
        SentimentDirection::Neutral
    };

    let factors: HashMap<String, f64> = SENTIMENT_FACTORS
        .iter()
        .map(|f| (f.to_string(), rng.gen_range(0.0..1.0)))
        .collect();

    Sentiment {
        overall_score,
        direction,
        confidence: rng.gen_range(0.7..0.95),
        factors,
    }
}

pub fn simulate_liquidity<R: Rng>(rng: &mut R) -> Liquidity {
    Liquidity {
        overall_score: rng.gen_range(0.3..0.9),
        bid_ask_spread: rng.gen_range(20_000.0..80_000.0),
        market_depth: rng.gen_range(0.4..0.8),
        trading_volume: rng.gen_range(1_000_000_000.0..5_000_000_000.0),
    }
}
