//! Scan result rendering and persistence
//!
//! Console rendering for humans plus a JSON file per scan so results can
//! be diffed across runs.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::pressure::PressureLevel;
use crate::runner::CycleResult;
use crate::settings::Thresholds;

/// Render a completed cycle as a console report
pub fn render(result: &CycleResult, thresholds: &Thresholds) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "VIETNAM GOLD PRESSURE SCAN");
    let _ = writeln!(out, "{}", "=".repeat(60));

    let fx = &result.fx_pressure;
    let _ = writeln!(out, "Base USD/VND rate:      {:>12.2}", fx.base_rate);
    let _ = writeln!(out, "Overnight swap pressure:{:>12.4}", fx.pressure_score);
    let _ = writeln!(out, "Adjusted USD/VND rate:  {:>12.2}", fx.adjusted_rate);
    let _ = writeln!(out, "Rate pressure:          {:>+11.4}%", fx.pressure_percent);

    let _ = writeln!(out);
    let _ = writeln!(out, "World gold: ${:.2}/oz", result.world_gold_usd);
    let _ = writeln!(out, "Domestic quote sources: {}", result.quote_sources);
    if result.volatility_index > thresholds.volatility_trigger {
        let _ = writeln!(
            out,
            "Volatility elevated: {:.4} (trigger {:.4})",
            result.volatility_index, thresholds.volatility_trigger
        );
    }

    let opportunities = &result.market_analysis.gold_arbitrage_opportunities;
    if !opportunities.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Arbitrage deviations ({} sources):", opportunities.len());
        for opp in opportunities {
            let marker = match opp.pressure_level {
                PressureLevel::High => "!!",
                PressureLevel::Medium => " !",
                PressureLevel::Low => "  ",
            };
            let _ = writeln!(
                out,
                "  {} {}: {:+.2}% (theoretical {:.0})",
                marker, opp.source, opp.arbitrage_percent, opp.theoretical_price
            );
        }
    }

    let actions = &result.market_analysis.recommended_actions;
    if !actions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recommended trades:");
        for action in actions {
            let _ = writeln!(out, "  > {}", action);
        }
    }

    let plan = &result.plan;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Decision: {} ({}) score {:.2}, confidence {:.2}",
        plan.strategy, plan.intensity, plan.intervention_score, plan.confidence
    );
    for reason in &plan.reasons {
        let _ = writeln!(out, "  - {}", reason);
    }
    for action in &plan.recommended_actions {
        let _ = writeln!(
            out,
            "  [{}] {} ({}s)",
            action.priority, action.action, action.estimated_duration
        );
    }
    let _ = writeln!(out, "Cycle success rate: {:.2}", result.success_rate);

    out
}

/// Persist a scan result as pretty JSON, one file per scan
pub fn save_scan(result: &CycleResult, dir: &Path) -> anyhow::Result<PathBuf> {
    let file_name = format!("vietnam_gold_scan_{}.json", result.timestamp.timestamp());
    let path = dir.join(file_name);

    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(&path, json)?;

    Ok(path)
}
