//! Action planning
//!
//! A pure lookup from strategy tier to an ordered action list. No
//! randomness, no I/O; identical tiers always produce identical plans.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::strategy::{Intensity, StrategyTier};

/// Abstract intervention actions, serialized as their wire identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    LaunchSpreadKiller,
    ExecuteArbitrageExploit,
    LiquidityInjection,
    ModeratePressureAttack,
    MonitorArbitrage,
    GentleSpreadPressure,
    ContinuousMonitoring,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::LaunchSpreadKiller => "launch_spread_killer",
            ActionKind::ExecuteArbitrageExploit => "execute_arbitrage_exploit",
            ActionKind::LiquidityInjection => "liquidity_injection",
            ActionKind::ModeratePressureAttack => "moderate_pressure_attack",
            ActionKind::MonitorArbitrage => "monitor_arbitrage",
            ActionKind::GentleSpreadPressure => "gentle_spread_pressure",
            ActionKind::ContinuousMonitoring => "continuous_monitoring",
        }
    }

    /// Monitoring actions complete locally and are never dispatched over HTTP
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ActionKind::MonitorArbitrage
                | ActionKind::GentleSpreadPressure
                | ActionKind::ContinuousMonitoring
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One planned action with its dispatch parameters
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    pub action: ActionKind,
    pub parameters: serde_json::Value,
    /// Ascending: 1 is executed first
    pub priority: u32,
    /// Seconds
    pub estimated_duration: u64,
}

/// Spread the aggressive plan drives toward, VND
const AGGRESSIVE_TARGET_SPREAD: u64 = 20_000;
/// VND injected by the tertiary aggressive action
const LIQUIDITY_INJECTION_VOLUME: u64 = 2_000_000_000;
/// VND gap watched by the moderate arbitrage monitor
const ARBITRAGE_MONITOR_THRESHOLD: u64 = 15_000;
/// Polling interval of the monitor-only action, seconds
const MONITORING_POLL_INTERVAL: u64 = 30;

/// Map a tier to its ordered action list
pub fn plan(tier: StrategyTier, intensity: Intensity) -> Vec<Action> {
    match tier {
        StrategyTier::AggressiveIntervention => vec![
            Action {
                action: ActionKind::LaunchSpreadKiller,
                parameters: json!({
                    "target_spread": AGGRESSIVE_TARGET_SPREAD,
                    "intensity": "EXTREME",
                }),
                priority: 1,
                estimated_duration: 300,
            },
            Action {
                action: ActionKind::ExecuteArbitrageExploit,
                parameters: json!({ "intensity": intensity.to_string() }),
                priority: 2,
                estimated_duration: 600,
            },
            Action {
                action: ActionKind::LiquidityInjection,
                parameters: json!({ "volume": LIQUIDITY_INJECTION_VOLUME }),
                priority: 3,
                estimated_duration: 900,
            },
        ],
        StrategyTier::ModerateIntervention => vec![
            Action {
                action: ActionKind::ModeratePressureAttack,
                parameters: json!({ "intensity": intensity.to_string() }),
                priority: 1,
                estimated_duration: 600,
            },
            Action {
                action: ActionKind::MonitorArbitrage,
                parameters: json!({ "threshold": ARBITRAGE_MONITOR_THRESHOLD }),
                priority: 2,
                estimated_duration: 1_200,
            },
        ],
        StrategyTier::LightIntervention => vec![Action {
            action: ActionKind::GentleSpreadPressure,
            parameters: json!({ "intensity": intensity.to_string() }),
            priority: 1,
            estimated_duration: 900,
        }],
        StrategyTier::MonitorOnly => vec![Action {
            action: ActionKind::ContinuousMonitoring,
            parameters: json!({ "interval": MONITORING_POLL_INTERVAL }),
            priority: 1,
            estimated_duration: 3_600,
        }],
    }
}
