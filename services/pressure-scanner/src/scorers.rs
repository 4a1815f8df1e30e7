//! Pressure scorers
//!
//! Four independent models, each a pure function of the feature vector
//! plus at most one draw from the injected signal source. The "models"
//! are fixed-parameter stand-ins; their accuracy/confidence figures are
//! inherited constants, not calibrated outputs, and are surfaced as
//! static metadata only.

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::settings::{Heuristics, Thresholds};
use crate::signal::SignalSource;

/// Static description of a scoring model
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub family: &'static str,
    pub accuracy: f64,
    pub confidence: f64,
}

pub const SPREAD_MODEL: ModelInfo = ModelInfo {
    name: "spread_predictor",
    family: "LSTM",
    accuracy: 0.87,
    confidence: 0.82,
};

pub const MOMENTUM_MODEL: ModelInfo = ModelInfo {
    name: "price_momentum",
    family: "RandomForest",
    accuracy: 0.91,
    confidence: 0.88,
};

pub const VOLATILITY_MODEL: ModelInfo = ModelInfo {
    name: "volatility_forecaster",
    family: "ARIMA-GARCH",
    accuracy: 0.84,
    confidence: 0.79,
};

pub const ARBITRAGE_MODEL: ModelInfo = ModelInfo {
    name: "arbitrage_detector",
    family: "SVM",
    accuracy: 0.93,
    confidence: 0.91,
};

/// Generic sub-score record, keyed by scorer name within one cycle
#[derive(Debug, Clone, Serialize)]
pub struct SubScore {
    pub name: &'static str,
    pub value: f64,
    pub confidence: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadDirection {
    Increasing,
    Decreasing,
}

/// Spread prediction, VND-bounded
#[derive(Debug, Clone, Serialize)]
pub struct SpreadForecast {
    pub current_spread: f64,
    pub predicted_spread: f64,
    pub confidence: f64,
    pub direction: SpreadDirection,
    pub intervention_needed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentumDirection {
    Up,
    Down,
    Sideways,
}

#[derive(Debug, Clone, Serialize)]
pub struct MomentumForecast {
    pub momentum_score: f64,
    pub direction: MomentumDirection,
    pub strength: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityRegime {
    Low,
    Normal,
    High,
}

impl VolatilityRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityRegime::Low => "low",
            VolatilityRegime::Normal => "normal",
            VolatilityRegime::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VolatilityForecast {
    pub current_volatility: f64,
    pub predicted_volatility: f64,
    pub confidence: f64,
    pub regime: VolatilityRegime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArbitrageSignal {
    pub arbitrage_score: f64,
    pub opportunity_exists: bool,
    pub potential_profit: f64,
    pub confidence: f64,
}

/// The four sub-scores of one scoring pass
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSet {
    pub spread: SpreadForecast,
    pub momentum: MomentumForecast,
    pub volatility: VolatilityForecast,
    pub arbitrage: ArbitrageSignal,
}

impl ScoreSet {
    /// Flatten into generic sub-score records for reporting
    pub fn subscores(&self) -> Vec<SubScore> {
        vec![
            SubScore {
                name: SPREAD_MODEL.name,
                value: self.spread.predicted_spread,
                confidence: self.spread.confidence,
                label: format!("{:?}", self.spread.direction).to_lowercase(),
            },
            SubScore {
                name: MOMENTUM_MODEL.name,
                value: self.momentum.momentum_score,
                confidence: self.momentum.confidence,
                label: format!("{:?}", self.momentum.direction).to_lowercase(),
            },
            SubScore {
                name: VOLATILITY_MODEL.name,
                value: self.volatility.predicted_volatility,
                confidence: self.volatility.confidence,
                label: self.volatility.regime.as_str().to_string(),
            },
            SubScore {
                name: ARBITRAGE_MODEL.name,
                value: self.arbitrage.arbitrage_score,
                confidence: self.arbitrage.confidence,
                label: if self.arbitrage.opportunity_exists {
                    "opportunity".to_string()
                } else {
                    "none".to_string()
                },
            },
        ]
    }
}

/// Momentum direction dead-band half-width
const MOMENTUM_DEAD_BAND: f64 = 0.1;
/// Volatility regime cut points
const VOLATILITY_NORMAL_FLOOR: f64 = 0.02;
const VOLATILITY_HIGH_FLOOR: f64 = 0.04;
/// Arbitrage score above which an opportunity is declared
const ARBITRAGE_OPPORTUNITY_CUTOFF: f64 = 0.7;

/// Predicted spread from the price trend and volatility features.
///
/// `predicted = baseline × (1 + (trend − 0.5) × 0.2 + volatility × 0.3)`
/// with `trend = price_millions / trend_base`, clamped to the documented
/// VND bounds.
pub fn predict_spread(
    features: &FeatureVector,
    thresholds: &Thresholds,
    heuristics: &Heuristics,
) -> SpreadForecast {
    let current_spread = heuristics.baseline_spread;
    let trend = features.reference_price_millions() / heuristics.price_trend_base;

    let raw = current_spread * (1.0 + (trend - 0.5) * 0.2 + features.volatility() * 0.3);
    let predicted_spread = raw.clamp(heuristics.spread_floor, heuristics.spread_ceiling);

    let direction = if predicted_spread > current_spread {
        SpreadDirection::Increasing
    } else {
        SpreadDirection::Decreasing
    };

    SpreadForecast {
        current_spread,
        predicted_spread,
        confidence: SPREAD_MODEL.accuracy,
        direction,
        intervention_needed: predicted_spread > thresholds.high_spread_threshold,
    }
}

/// Momentum magnitude in [−1, 1] with a ±0.1 dead-band on direction
pub fn score_momentum(signal: &mut dyn SignalSource) -> MomentumForecast {
    let momentum_score = (signal.next_value() * 2.0 - 1.0).clamp(-1.0, 1.0);

    let direction = if momentum_score > MOMENTUM_DEAD_BAND {
        MomentumDirection::Up
    } else if momentum_score < -MOMENTUM_DEAD_BAND {
        MomentumDirection::Down
    } else {
        MomentumDirection::Sideways
    };

    MomentumForecast {
        momentum_score,
        direction,
        strength: momentum_score.abs(),
        confidence: MOMENTUM_MODEL.accuracy,
    }
}

/// Volatility forecast: current level times a multiplier in [0.8, 1.5]
pub fn forecast_volatility(
    features: &FeatureVector,
    signal: &mut dyn SignalSource,
) -> VolatilityForecast {
    let current_volatility = features.volatility().max(0.0);
    let multiplier = 0.8 + signal.next_value() * 0.7;
    let predicted_volatility = current_volatility * multiplier;

    let regime = if predicted_volatility > VOLATILITY_HIGH_FLOOR {
        VolatilityRegime::High
    } else if predicted_volatility > VOLATILITY_NORMAL_FLOOR {
        VolatilityRegime::Normal
    } else {
        VolatilityRegime::Low
    };

    VolatilityForecast {
        current_volatility,
        predicted_volatility,
        confidence: VOLATILITY_MODEL.accuracy,
        regime,
    }
}

/// Arbitrage score in [0, 1]; an opportunity exists above 0.7
pub fn detect_arbitrage(
    signal: &mut dyn SignalSource,
    heuristics: &Heuristics,
) -> ArbitrageSignal {
    let arbitrage_score = signal.next_value().clamp(0.0, 1.0);

    ArbitrageSignal {
        arbitrage_score,
        opportunity_exists: arbitrage_score > ARBITRAGE_OPPORTUNITY_CUTOFF,
        potential_profit: arbitrage_score * heuristics.max_arbitrage_profit,
        confidence: ARBITRAGE_MODEL.accuracy,
    }
}

/// Run all four scorers. They are mutually independent; the fixed call
/// order only pins which draw each stochastic scorer consumes.
pub fn score_all(
    features: &FeatureVector,
    thresholds: &Thresholds,
    heuristics: &Heuristics,
    signal: &mut dyn SignalSource,
) -> ScoreSet {
    ScoreSet {
        spread: predict_spread(features, thresholds, heuristics),
        momentum: score_momentum(signal),
        volatility: forecast_volatility(features, signal),
        arbitrage: detect_arbitrage(signal, heuristics),
    }
}
