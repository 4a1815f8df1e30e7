//! Scan orchestration
//!
//! Runs the collect → extract → score → synthesize → plan → dispatch →
//! record cycle, either once or on an interval until a deadline. A cycle
//! failure shortens the next wait but never stops the loop; cancellation
//! is only observed at the inter-cycle sleep, so a started cycle always
//! completes and records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_data::types::MarketSnapshot;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::dispatcher::ActionDispatcher;
use crate::features::{self, ScanError};
use crate::history::{ActionOutcome, InterventionHistory, InterventionRecord, InterventionReport};
use crate::planner;
use crate::pressure::{self, FxPressure, PressureMetrics};
use crate::scorers;
use crate::settings::Settings;
use crate::signal::SignalSource;
use crate::strategy::{self, InterventionPlan};

/// Where the runner currently is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanState {
    Idle,
    Collecting,
    Scoring,
    Deciding,
    Dispatching,
    Recorded,
    Terminated,
}

/// Supplies one snapshot per cycle. Implementations absorb every feed
/// failure; the runner never sees partial data.
#[async_trait]
pub trait SnapshotProvider: Send {
    async fn collect(&mut self) -> MarketSnapshot;
}

#[async_trait]
impl SnapshotProvider for market_data::SnapshotCollector {
    async fn collect(&mut self) -> MarketSnapshot {
        market_data::SnapshotCollector::collect(self).await
    }
}

/// Everything one completed cycle produced
#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    pub timestamp: DateTime<Utc>,
    pub plan: InterventionPlan,
    pub fx_pressure: FxPressure,
    pub market_analysis: PressureMetrics,
    pub world_gold_usd: f64,
    pub quote_sources: usize,
    pub volatility_index: f64,
    pub success_rate: f64,
}

pub struct ScanRunner {
    provider: Box<dyn SnapshotProvider>,
    dispatcher: Box<dyn ActionDispatcher>,
    signal: Box<dyn SignalSource>,
    settings: Settings,
    history: InterventionHistory,
    state: ScanState,
    cycle_count: u32,
}

impl ScanRunner {
    pub fn new(
        provider: Box<dyn SnapshotProvider>,
        dispatcher: Box<dyn ActionDispatcher>,
        signal: Box<dyn SignalSource>,
        settings: Settings,
    ) -> Self {
        let retention = settings.history.retention;
        Self {
            provider,
            dispatcher,
            signal,
            settings,
            history: InterventionHistory::new(retention),
            state: ScanState::Idle,
            cycle_count: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn history(&self) -> &InterventionHistory {
        &self.history
    }

    pub fn report(&self) -> InterventionReport {
        self.history
            .report(self.settings.history.report_interventions)
    }

    /// Score one snapshot into a plan. No side effects beyond consuming
    /// signal draws; this is the entry point for callers who want a
    /// decision without dispatch or history bookkeeping.
    pub fn run_cycle(&mut self, snapshot: &MarketSnapshot) -> Result<InterventionPlan, ScanError> {
        let features = features::extract(snapshot, &self.settings.heuristics)?;

        let scores = scorers::score_all(
            &features,
            &self.settings.thresholds,
            &self.settings.heuristics,
            self.signal.as_mut(),
        );

        let mut plan =
            strategy::synthesize(&scores, features.sentiment(), &self.settings.thresholds);
        plan.recommended_actions = planner::plan(plan.strategy, plan.intensity);

        Ok(plan)
    }

    /// One full cycle including dispatch and history recording
    pub async fn run_once(&mut self) -> Result<CycleResult, ScanError> {
        self.cycle_count += 1;
        info!("Scan cycle {} starting", self.cycle_count);

        self.state = ScanState::Collecting;
        let snapshot = self.provider.collect().await;

        self.state = ScanState::Scoring;
        let plan = match self.run_cycle(&snapshot) {
            Ok(plan) => plan,
            Err(e) => {
                self.state = ScanState::Idle;
                return Err(e);
            }
        };
        self.state = ScanState::Deciding;

        let base_rate = snapshot.fx.rate.to_f64().unwrap_or(0.0);
        let fx_pressure = pressure::simulate_overnight_pressure(
            &snapshot.swaps,
            base_rate,
            &self.settings.heuristics,
        );
        let world_gold_usd = snapshot.world_gold.price_usd.to_f64().unwrap_or(0.0);
        let market_analysis = pressure::arbitrage_metrics(
            world_gold_usd,
            &snapshot.quotes,
            &fx_pressure,
            &self.settings.thresholds,
            &self.settings.heuristics,
        );

        info!(
            "Decision: {} (score {:.2}, {} reasons)",
            plan.strategy,
            plan.intervention_score,
            plan.reasons.len()
        );

        self.state = ScanState::Dispatching;
        let outcomes = self.dispatch_plan(&plan).await;

        let record = InterventionRecord::new(&plan, outcomes);
        let success_rate = record.success_rate;
        self.history.push(record);
        self.state = ScanState::Recorded;

        let result = CycleResult {
            timestamp: snapshot.timestamp,
            plan,
            fx_pressure,
            market_analysis,
            world_gold_usd,
            quote_sources: snapshot.quotes.len(),
            volatility_index: snapshot.volatility_index,
            success_rate,
        };

        self.state = ScanState::Idle;
        Ok(result)
    }

    /// Execute the plan's actions in priority order. Below the dispatch
    /// score floor nothing leaves the process: the planned monitoring
    /// actions are recorded as locally initiated.
    async fn dispatch_plan(&mut self, plan: &InterventionPlan) -> Vec<ActionOutcome> {
        if plan.intervention_score < self.settings.dispatch.min_dispatch_score {
            return plan
                .recommended_actions
                .iter()
                .map(|a| ActionOutcome {
                    action: a.action,
                    success: true,
                    message: format!("Monitoring action {} initiated", a.action),
                })
                .collect();
        }

        let mut outcomes = Vec::with_capacity(plan.recommended_actions.len());
        for action in &plan.recommended_actions {
            info!("Dispatching {} (priority {})", action.action, action.priority);
            let outcome = self.dispatcher.dispatch(action).await;
            if !outcome.success {
                warn!("Action {} failed: {}", action.action, outcome.message);
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Repeat cycles until the deadline. Errors shorten the next wait;
    /// Ctrl-C between cycles ends the loop.
    pub async fn run_continuous(&mut self, duration: Duration) -> InterventionReport {
        info!("Continuous scan for {:?} starting", duration);
        let deadline = Instant::now() + duration;

        while Instant::now() < deadline {
            let wait = match self.run_once().await {
                Ok(result) => {
                    info!(
                        "Cycle {} recorded: {} (success rate {:.2})",
                        self.cycle_count, result.plan.strategy, result.success_rate
                    );
                    Duration::from_secs(self.settings.cycle.interval_secs)
                }
                Err(e) => {
                    error!("Scan cycle failed: {}", e);
                    Duration::from_secs(self.settings.cycle.error_backoff_secs)
                }
            };

            if Instant::now() + wait >= deadline {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping after completed cycle");
                    break;
                }
            }
        }

        self.state = ScanState::Terminated;
        info!("Continuous scan finished after {} cycles", self.cycle_count);
        self.report()
    }
}
