//! Overnight FX pressure simulation and arbitrage metrics
//!
//! The swap book is turned into a scalar pressure score which nudges the
//! USD/VND rate; domestic quotes are then compared against the
//! world-price-implied theoretical level at the adjusted rate.

use market_data::sources::swaps::{USD_LIQUIDITY_SWAP, VND_LIQUIDITY_PRESSURE};
use market_data::types::{GoldQuote, SwapOperation};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::settings::{Heuristics, Thresholds};

/// Result of the overnight pressure simulation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FxPressure {
    pub base_rate: f64,
    pub adjusted_rate: f64,
    pub pressure_score: f64,
    /// Rate move implied by the pressure, percent
    pub pressure_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PressureLevel {
    High,
    Medium,
    Low,
}

/// One dealer's deviation from the theoretical price
#[derive(Debug, Clone, Serialize)]
pub struct ArbitrageOpportunity {
    pub source: String,
    pub actual_price: f64,
    pub theoretical_price: f64,
    pub arbitrage_percent: f64,
    pub pressure_level: PressureLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct PressureMetrics {
    /// Rate move implied by the swap pressure, percent
    pub usd_pressure: f64,
    pub gold_arbitrage_opportunities: Vec<ArbitrageOpportunity>,
    pub recommended_actions: Vec<String>,
}

/// Deviation percent bounds for the pressure level labels
const HIGH_DEVIATION_PERCENT: f64 = 2.0;
const MEDIUM_DEVIATION_PERCENT: f64 = 1.0;

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Simulate overnight USD pressure from the swap book.
///
/// Overnight USD liquidity swaps contribute `(amount / 1e6) × (rate / 100)`
/// points; VND liquidity pressure counts inversely at the configured
/// factor. Each pressure point moves the rate by the configured delta.
pub fn simulate_overnight_pressure(
    swaps: &[SwapOperation],
    base_rate: f64,
    heuristics: &Heuristics,
) -> FxPressure {
    let mut pressure = 0.0;

    for op in swaps {
        if op.currency == "USD" && op.operation_type == USD_LIQUIDITY_SWAP && op.term_in_days == 1
        {
            pressure += (op.amount as f64 / 1e6) * (op.interest_rate / 100.0);
        } else if op.currency == "VND" && op.operation_type == VND_LIQUIDITY_PRESSURE {
            pressure += (op.amount as f64 / 1e12)
                * (op.interest_rate / 100.0)
                * heuristics.vnd_pressure_factor;
        }
    }

    let pressure_score = round_to(pressure, 4);
    let delta = pressure_score * heuristics.swap_pressure_fx_delta;
    let adjusted_rate = round_to(base_rate * (1.0 + delta), 2);

    let pressure_percent = if base_rate != 0.0 {
        round_to((adjusted_rate - base_rate) / base_rate * 100.0, 4)
    } else {
        0.0
    };

    FxPressure {
        base_rate,
        adjusted_rate,
        pressure_score,
        pressure_percent,
    }
}

/// Compare each dealer quote against the theoretical domestic price at the
/// adjusted rate. A recommendation is emitted when the deviation clears
/// both the percent band and the configured minimum VND gap.
pub fn arbitrage_metrics(
    world_gold_usd: f64,
    quotes: &[GoldQuote],
    pressure: &FxPressure,
    thresholds: &Thresholds,
    heuristics: &Heuristics,
) -> PressureMetrics {
    let theoretical =
        world_gold_usd * pressure.adjusted_rate * heuristics.tael_per_troy_ounce;

    let mut opportunities = Vec::new();
    let mut recommended_actions = Vec::new();

    if theoretical > 0.0 {
        for quote in quotes {
            let actual = match quote.buy.to_f64() {
                Some(p) if p > 0.0 => p,
                _ => continue,
            };

            let deviation_percent = (actual - theoretical) / theoretical * 100.0;
            let deviation_vnd = (actual - theoretical).abs();

            let pressure_level = if deviation_percent.abs() > HIGH_DEVIATION_PERCENT {
                PressureLevel::High
            } else if deviation_percent.abs() > MEDIUM_DEVIATION_PERCENT {
                PressureLevel::Medium
            } else {
                PressureLevel::Low
            };

            opportunities.push(ArbitrageOpportunity {
                source: quote.source.clone(),
                actual_price: actual,
                theoretical_price: theoretical.round(),
                arbitrage_percent: round_to(deviation_percent, 2),
                pressure_level,
            });

            if deviation_vnd >= thresholds.arbitrage_minimum {
                if deviation_percent > HIGH_DEVIATION_PERCENT {
                    recommended_actions.push(format!(
                        "SELL {}: Overpriced by {:.2}%",
                        quote.source, deviation_percent
                    ));
                } else if deviation_percent < -HIGH_DEVIATION_PERCENT {
                    recommended_actions.push(format!(
                        "BUY {}: Underpriced by {:.2}%",
                        quote.source,
                        deviation_percent.abs()
                    ));
                }
            }
        }
    }

    PressureMetrics {
        usd_pressure: pressure.pressure_percent,
        gold_arbitrage_opportunities: opportunities,
        recommended_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_data::SwapBook;

    #[test]
    fn simulated_book_pressure_matches_hand_calculation() {
        // USD: (150e6 / 1e6) * 0.055 = 8.25
        // VND: (2.5e12 / 1e12) * 0.048 * -0.5 = -0.06
        let book = SwapBook::simulated();
        let pressure =
            simulate_overnight_pressure(book.operations(), 25_100.0, &Heuristics::default());

        assert!((pressure.pressure_score - 8.19).abs() < 1e-9);
        // 25100 * (1 + 8.19 * 0.00005) = 25110.28 (rounded to 2dp)
        assert!((pressure.adjusted_rate - 25_110.28).abs() < 1e-9);
        assert!(pressure.pressure_percent > 0.04 && pressure.pressure_percent < 0.042);
    }

    #[test]
    fn non_overnight_and_jpy_swaps_are_ignored() {
        let mut ops = SwapBook::simulated().operations().to_vec();
        for op in &mut ops {
            if op.currency == "USD" {
                op.term_in_days = 7;
            }
        }
        let pressure = simulate_overnight_pressure(&ops, 25_100.0, &Heuristics::default());

        // Only the VND inverse contribution remains
        assert!((pressure.pressure_score - (-0.06)).abs() < 1e-9);
    }

    #[test]
    fn overpriced_dealer_is_flagged_for_selling() {
        let heuristics = Heuristics::default();
        let pressure = FxPressure {
            base_rate: 25_100.0,
            adjusted_rate: 25_100.0,
            pressure_score: 0.0,
            pressure_percent: 0.0,
        };
        // theoretical = 2650 * 25100 * 1.20565... ~ 80.19m
        let theoretical = 2650.0 * 25_100.0 * heuristics.tael_per_troy_ounce;
        let overpriced = (theoretical * 1.03) as i64;
        let fair = (theoretical * 1.005) as i64;

        let quotes = vec![
            GoldQuote::new("SJC", overpriced, overpriced + 45_000),
            GoldQuote::new("DOJI", fair, fair + 45_000),
        ];

        let metrics = arbitrage_metrics(
            2650.0,
            &quotes,
            &pressure,
            &Thresholds::default(),
            &heuristics,
        );

        assert_eq!(metrics.gold_arbitrage_opportunities.len(), 2);
        assert_eq!(
            metrics.gold_arbitrage_opportunities[0].pressure_level,
            PressureLevel::High
        );
        assert_eq!(
            metrics.gold_arbitrage_opportunities[1].pressure_level,
            PressureLevel::Low
        );
        assert_eq!(metrics.recommended_actions.len(), 1);
        assert!(metrics.recommended_actions[0].starts_with("SELL SJC"));
    }

    #[test]
    fn underpriced_dealer_is_flagged_for_buying() {
        let heuristics = Heuristics::default();
        let pressure = FxPressure {
            base_rate: 25_100.0,
            adjusted_rate: 25_100.0,
            pressure_score: 0.0,
            pressure_percent: 0.0,
        };
        let theoretical = 2650.0 * 25_100.0 * heuristics.tael_per_troy_ounce;
        let underpriced = (theoretical * 0.96) as i64;

        let quotes = vec![GoldQuote::new("PNJ", underpriced, underpriced + 45_000)];
        let metrics = arbitrage_metrics(
            2650.0,
            &quotes,
            &pressure,
            &Thresholds::default(),
            &heuristics,
        );

        assert_eq!(metrics.recommended_actions.len(), 1);
        assert!(metrics.recommended_actions[0].starts_with("BUY PNJ"));
    }

    #[test]
    fn small_absolute_gaps_are_not_recommended() {
        // 3% of a tiny theoretical price stays under the VND minimum
        let heuristics = Heuristics::default();
        let pressure = FxPressure {
            base_rate: 25_100.0,
            adjusted_rate: 25_100.0,
            pressure_score: 0.0,
            pressure_percent: 0.0,
        };
        let quotes = vec![GoldQuote::new("SJC", 320_000, 330_000)];

        // world price scaled down so theoretical ~ 310k VND
        let metrics = arbitrage_metrics(
            10.25,
            &quotes,
            &pressure,
            &Thresholds::default(),
            &heuristics,
        );

        assert_eq!(metrics.gold_arbitrage_opportunities.len(), 1);
        assert!(metrics.recommended_actions.is_empty());
    }
}
