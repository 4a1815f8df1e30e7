//! Strategy synthesis
//!
//! Weighted additive scoring over the four sub-scores plus the sentiment
//! feature, mapped to a discrete tier. Weights and cut points are fixed;
//! each firing condition appends its reason string in evaluation order.

use serde::{Deserialize, Serialize};

use crate::planner::Action;
use crate::scorers::{ScoreSet, VolatilityRegime};
use crate::settings::Thresholds;

/// Discrete strategy tiers, strongest last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyTier {
    MonitorOnly,
    LightIntervention,
    ModerateIntervention,
    AggressiveIntervention,
}

impl std::fmt::Display for StrategyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StrategyTier::MonitorOnly => "MONITOR_ONLY",
            StrategyTier::LightIntervention => "LIGHT_INTERVENTION",
            StrategyTier::ModerateIntervention => "MODERATE_INTERVENTION",
            StrategyTier::AggressiveIntervention => "AGGRESSIVE_INTERVENTION",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Intensity::None => "NONE",
            Intensity::Low => "LOW",
            Intensity::Medium => "MEDIUM",
            Intensity::High => "HIGH",
        };
        write!(f, "{}", s)
    }
}

/// Outcome estimates attached to a plan
#[derive(Debug, Clone, Serialize)]
pub struct PredictedOutcomes {
    /// Positive when the predicted spread sits below the assumed current one
    pub spread_reduction: f64,
    pub profit_potential: f64,
    pub risk_level: VolatilityRegime,
}

/// The decision for one cycle. Immutable once produced; the action list
/// is attached by the planner.
#[derive(Debug, Clone, Serialize)]
pub struct InterventionPlan {
    pub strategy: StrategyTier,
    pub intensity: Intensity,
    pub intervention_score: f64,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub predicted_outcomes: PredictedOutcomes,
    pub recommended_actions: Vec<Action>,
}

/// Contribution weights, summing to 1.0 across all five conditions
const WEIGHT_HIGH_SPREAD: f64 = 0.30;
const WEIGHT_ARBITRAGE: f64 = 0.25;
const WEIGHT_HIGH_VOLATILITY: f64 = 0.20;
const WEIGHT_STRONG_MOMENTUM: f64 = 0.15;
const WEIGHT_MARKET_FEAR: f64 = 0.10;

/// Momentum strength above which the momentum condition fires
const STRONG_MOMENTUM_CUTOFF: f64 = 0.6;
/// Sentiment below this reads as market fear
const FEAR_CUTOFF: f64 = 0.3;
/// Tier cut points below the configurable aggressive threshold
const MODERATE_CUTOFF: f64 = 0.50;
const LIGHT_CUTOFF: f64 = 0.30;

/// Combine sub-scores into a tier decision.
///
/// Idempotent: identical inputs always yield the identical score, tier
/// and reason list.
pub fn synthesize(
    scores: &ScoreSet,
    sentiment_score: f64,
    thresholds: &Thresholds,
) -> InterventionPlan {
    let mut intervention_score = 0.0;
    let mut reasons = Vec::new();

    if scores.spread.intervention_needed {
        intervention_score += WEIGHT_HIGH_SPREAD;
        reasons.push("High spread predicted".to_string());
    }
    if scores.arbitrage.opportunity_exists {
        intervention_score += WEIGHT_ARBITRAGE;
        reasons.push("Arbitrage opportunity detected".to_string());
    }
    if scores.volatility.regime == VolatilityRegime::High {
        intervention_score += WEIGHT_HIGH_VOLATILITY;
        reasons.push("High volatility predicted".to_string());
    }
    if scores.momentum.strength > STRONG_MOMENTUM_CUTOFF {
        intervention_score += WEIGHT_STRONG_MOMENTUM;
        reasons.push("Strong momentum detected".to_string());
    }
    if sentiment_score < FEAR_CUTOFF {
        intervention_score += WEIGHT_MARKET_FEAR;
        reasons.push("Market fear detected".to_string());
    }

    // Weights already sum to 1.0; the clamp guards config drift only
    let intervention_score = intervention_score.clamp(0.0, 1.0);

    let (strategy, intensity) =
        if intervention_score >= thresholds.intervention_confidence_threshold {
            (StrategyTier::AggressiveIntervention, Intensity::High)
        } else if intervention_score >= MODERATE_CUTOFF {
            (StrategyTier::ModerateIntervention, Intensity::Medium)
        } else if intervention_score >= LIGHT_CUTOFF {
            (StrategyTier::LightIntervention, Intensity::Low)
        } else {
            (StrategyTier::MonitorOnly, Intensity::None)
        };

    InterventionPlan {
        strategy,
        intensity,
        intervention_score,
        confidence: (intervention_score * 1.2).min(1.0),
        reasons,
        predicted_outcomes: PredictedOutcomes {
            spread_reduction: scores.spread.current_spread - scores.spread.predicted_spread,
            profit_potential: scores.arbitrage.potential_profit,
            risk_level: scores.volatility.regime,
        },
        recommended_actions: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorers::{
        ArbitrageSignal, MomentumDirection, MomentumForecast, SpreadDirection, SpreadForecast,
        VolatilityForecast,
    };

    fn quiet_scores() -> ScoreSet {
        ScoreSet {
            spread: SpreadForecast {
                current_spread: 45_000.0,
                predicted_spread: 44_000.0,
                confidence: 0.87,
                direction: SpreadDirection::Decreasing,
                intervention_needed: false,
            },
            momentum: MomentumForecast {
                momentum_score: 0.05,
                direction: MomentumDirection::Sideways,
                strength: 0.05,
                confidence: 0.91,
            },
            volatility: VolatilityForecast {
                current_volatility: 0.015,
                predicted_volatility: 0.018,
                confidence: 0.84,
                regime: VolatilityRegime::Low,
            },
            arbitrage: ArbitrageSignal {
                arbitrage_score: 0.2,
                opportunity_exists: false,
                potential_profit: 6_000.0,
                confidence: 0.93,
            },
        }
    }

    fn with_spread_flag(mut scores: ScoreSet) -> ScoreSet {
        scores.spread.predicted_spread = 52_000.0;
        scores.spread.intervention_needed = true;
        scores
    }

    fn with_high_volatility(mut scores: ScoreSet) -> ScoreSet {
        scores.volatility.predicted_volatility = 0.05;
        scores.volatility.regime = VolatilityRegime::High;
        scores
    }

    fn with_arbitrage(mut scores: ScoreSet) -> ScoreSet {
        scores.arbitrage.arbitrage_score = 0.85;
        scores.arbitrage.opportunity_exists = true;
        scores.arbitrage.potential_profit = 25_500.0;
        scores
    }

    fn with_momentum(mut scores: ScoreSet) -> ScoreSet {
        scores.momentum.momentum_score = 0.8;
        scores.momentum.strength = 0.8;
        scores.momentum.direction = MomentumDirection::Up;
        scores
    }

    #[test]
    fn quiet_market_scores_zero_and_monitors() {
        let plan = synthesize(&quiet_scores(), 0.5, &Thresholds::default());

        assert_eq!(plan.intervention_score, 0.0);
        assert_eq!(plan.strategy, StrategyTier::MonitorOnly);
        assert_eq!(plan.intensity, Intensity::None);
        assert!(plan.reasons.is_empty());
        assert_eq!(plan.confidence, 0.0);
    }

    #[test]
    fn stressed_market_reaches_moderate_tier() {
        // Spread flag + high volatility + fear = 0.30 + 0.20 + 0.10
        let scores = with_high_volatility(with_spread_flag(quiet_scores()));
        let plan = synthesize(&scores, 0.25, &Thresholds::default());

        assert!((plan.intervention_score - 0.60).abs() < 1e-12);
        assert_eq!(plan.strategy, StrategyTier::ModerateIntervention);
        assert_eq!(plan.intensity, Intensity::Medium);
        assert_eq!(
            plan.reasons,
            vec![
                "High spread predicted",
                "High volatility predicted",
                "Market fear detected"
            ]
        );
        assert!((plan.confidence - 0.72).abs() < 1e-12);
    }

    #[test]
    fn all_conditions_reach_aggressive_tier() {
        let scores =
            with_momentum(with_arbitrage(with_high_volatility(with_spread_flag(quiet_scores()))));
        let plan = synthesize(&scores, 0.1, &Thresholds::default());

        assert!((plan.intervention_score - 1.0).abs() < 1e-12);
        assert_eq!(plan.strategy, StrategyTier::AggressiveIntervention);
        assert_eq!(plan.intensity, Intensity::High);
        assert_eq!(plan.reasons.len(), 5);
        assert_eq!(plan.confidence, 1.0);
    }

    #[test]
    fn light_tier_between_cutoffs() {
        // Spread flag alone is 0.30: exactly the light cutoff
        let plan = synthesize(&with_spread_flag(quiet_scores()), 0.5, &Thresholds::default());
        assert_eq!(plan.strategy, StrategyTier::LightIntervention);
        assert_eq!(plan.intensity, Intensity::Low);
    }

    #[test]
    fn score_is_monotone_in_trigger_conditions() {
        let sentiment = 0.5;
        let thresholds = Thresholds::default();

        let base = synthesize(&quiet_scores(), sentiment, &thresholds).intervention_score;
        let one = synthesize(&with_spread_flag(quiet_scores()), sentiment, &thresholds)
            .intervention_score;
        let two = synthesize(
            &with_arbitrage(with_spread_flag(quiet_scores())),
            sentiment,
            &thresholds,
        )
        .intervention_score;
        let three = synthesize(
            &with_high_volatility(with_arbitrage(with_spread_flag(quiet_scores()))),
            sentiment,
            &thresholds,
        )
        .intervention_score;

        assert!(base < one && one < two && two < three);
    }

    #[test]
    fn synthesis_is_idempotent() {
        let scores = with_high_volatility(with_spread_flag(quiet_scores()));
        let a = synthesize(&scores, 0.25, &Thresholds::default());
        let b = synthesize(&scores, 0.25, &Thresholds::default());

        assert_eq!(a.strategy, b.strategy);
        assert_eq!(a.intensity, b.intensity);
        assert_eq!(a.intervention_score, b.intervention_score);
        assert_eq!(a.reasons, b.reasons);
    }

    #[test]
    fn tier_strings_serialize_like_the_wire_format() {
        assert_eq!(
            serde_json::to_value(StrategyTier::AggressiveIntervention).unwrap(),
            "AGGRESSIVE_INTERVENTION"
        );
        assert_eq!(serde_json::to_value(Intensity::None).unwrap(), "NONE");
    }
}
