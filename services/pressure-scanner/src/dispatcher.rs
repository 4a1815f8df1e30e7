//! Action dispatch
//!
//! Sends planned actions to the intervention API. Dispatch failures are
//! reported as outcomes, never as errors: the runner records them and
//! moves on.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::history::ActionOutcome;
use crate::planner::{Action, ActionKind};
use crate::settings::DispatchSettings;

#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    /// Execute one action and report how it went
    async fn dispatch(&self, action: &Action) -> ActionOutcome;
}

/// Dispatcher backed by the intervention HTTP API
pub struct HttpDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDispatcher {
    pub fn new(settings: &DispatchSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, kind: ActionKind) -> Option<String> {
        let path = match kind {
            ActionKind::LaunchSpreadKiller => "/api/attack/spread-kill",
            ActionKind::ExecuteArbitrageExploit => "/api/arbitrage/ai-exploit",
            ActionKind::LiquidityInjection => "/api/attack/liquidity-injection",
            ActionKind::ModeratePressureAttack => "/api/attack/vietnam-gold",
            _ => return None,
        };
        Some(format!("{}{}", self.base_url, path))
    }

    fn payload(&self, action: &Action) -> serde_json::Value {
        let params = &action.parameters;
        match action.action {
            ActionKind::LaunchSpreadKiller => json!({
                "vector": "AI_SPREAD_KILLER",
                "target_spread": params["target_spread"],
                "intensity": params["intensity"],
                "duration": action.estimated_duration,
            }),
            ActionKind::ExecuteArbitrageExploit => json!({
                "intensity": params["intensity"],
                "duration": action.estimated_duration,
            }),
            ActionKind::LiquidityInjection => json!({
                "volume": params["volume"],
                "injection_pattern": "AI_OPTIMIZED",
                "duration": action.estimated_duration,
            }),
            ActionKind::ModeratePressureAttack => json!({
                "target": "SJC",
                "intensity": params["intensity"],
                "duration": action.estimated_duration,
                "ai_guided": true,
            }),
            _ => params.clone(),
        }
    }
}

#[async_trait]
impl ActionDispatcher for HttpDispatcher {
    async fn dispatch(&self, action: &Action) -> ActionOutcome {
        // Monitoring actions run locally and always succeed
        let url = match self.endpoint(action.action) {
            Some(url) => url,
            None => {
                debug!("Action {} handled locally", action.action);
                return ActionOutcome {
                    action: action.action,
                    success: true,
                    message: format!("Monitoring action {} initiated", action.action),
                };
            }
        };

        let result = self
            .client
            .post(&url)
            .json(&self.payload(action))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => ActionOutcome {
                action: action.action,
                success: true,
                message: "Action executed successfully".to_string(),
            },
            Ok(response) => {
                warn!("Action {} rejected: {}", action.action, response.status());
                ActionOutcome {
                    action: action.action,
                    success: false,
                    message: format!("API error: {}", response.status()),
                }
            }
            Err(e) => {
                warn!("Action {} dispatch failed: {}", action.action, e);
                ActionOutcome {
                    action: action.action,
                    success: false,
                    message: format!("Execution error: {}", e),
                }
            }
        }
    }
}
