//! Snapshot fixtures for unit tests

use chrono::Utc;
use market_data::types::{
    FxRate, GoldQuote, Liquidity, MarketSnapshot, Sentiment, SentimentDirection, WorldGold,
};
use market_data::SwapBook;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub struct SnapshotBuilder {
    quotes: Vec<GoldQuote>,
    world_price: f64,
    world_change_percent: f64,
    fx_rate: i64,
    sentiment_score: f64,
    sentiment_confidence: f64,
    volatility: f64,
    liquidity: f64,
}

pub fn snapshot_builder() -> SnapshotBuilder {
    SnapshotBuilder {
        quotes: Vec::new(),
        world_price: 2650.0,
        world_change_percent: 0.0,
        fx_rate: 24_500,
        sentiment_score: 0.5,
        sentiment_confidence: 0.8,
        volatility: 0.02,
        liquidity: 0.6,
    }
}

impl SnapshotBuilder {
    pub fn sjc_buy(mut self, buy: i64) -> Self {
        self.quotes.push(GoldQuote::new("SJC", buy, buy + 45_000));
        self
    }

    pub fn no_quotes(mut self) -> Self {
        self.quotes.clear();
        self
    }

    pub fn world_price(mut self, price: f64) -> Self {
        self.world_price = price;
        self
    }

    pub fn world_change_percent(mut self, change: f64) -> Self {
        self.world_change_percent = change;
        self
    }

    pub fn fx_rate(mut self, rate: i64) -> Self {
        self.fx_rate = rate;
        self
    }

    pub fn sentiment(mut self, score: f64, confidence: f64) -> Self {
        self.sentiment_score = score;
        self.sentiment_confidence = confidence;
        self
    }

    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn liquidity(mut self, liquidity: f64) -> Self {
        self.liquidity = liquidity;
        self
    }

    pub fn build(self) -> MarketSnapshot {
        let direction = if self.sentiment_score > 0.6 {
            SentimentDirection::Bullish
        } else if self.sentiment_score < 0.4 {
            SentimentDirection::Bearish
        } else {
            SentimentDirection::Neutral
        };

        MarketSnapshot {
            timestamp: Utc::now(),
            quotes: self.quotes,
            world_gold: WorldGold {
                price_usd: Decimal::try_from(self.world_price).unwrap(),
                change_24h: 0.0,
                change_percent: self.world_change_percent,
            },
            fx: FxRate {
                rate: Decimal::from(self.fx_rate),
                last_updated: Utc::now(),
                source: "fallback".to_string(),
            },
            swaps: SwapBook::simulated().operations().to_vec(),
            sentiment: Sentiment {
                overall_score: self.sentiment_score,
                direction,
                confidence: self.sentiment_confidence,
                factors: HashMap::new(),
            },
            volatility_index: self.volatility,
            liquidity: Liquidity {
                overall_score: self.liquidity,
                bid_ask_spread: 45_000.0,
                market_depth: 0.6,
                trading_volume: 2_000_000_000.0,
            },
        }
    }
}
