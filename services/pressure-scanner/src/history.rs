//! Intervention history
//!
//! Bounded ring buffer of completed cycles, appended only by the scan
//! runner. Oldest records are evicted first; order is append order.
//! Reports summarize the most recent slice.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::collections::VecDeque;
use uuid::Uuid;

use crate::planner::ActionKind;
use crate::strategy::{Intensity, InterventionPlan, StrategyTier};

/// Per-action execution outcome
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub action: ActionKind,
    pub success: bool,
    pub message: String,
}

/// One recorded cycle: the decision plus how dispatch went
#[derive(Debug, Clone, Serialize)]
pub struct InterventionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub strategy: StrategyTier,
    pub intensity: Intensity,
    pub intervention_score: f64,
    pub actions_executed: usize,
    pub actions_successful: usize,
    pub success_rate: f64,
    pub outcomes: Vec<ActionOutcome>,
}

impl InterventionRecord {
    pub fn new(plan: &InterventionPlan, outcomes: Vec<ActionOutcome>) -> Self {
        let actions_executed = outcomes.len();
        let actions_successful = outcomes.iter().filter(|o| o.success).count();
        let success_rate = if actions_executed > 0 {
            actions_successful as f64 / actions_executed as f64
        } else {
            0.0
        };

        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            strategy: plan.strategy,
            intensity: plan.intensity,
            intervention_score: plan.intervention_score,
            actions_executed,
            actions_successful,
            success_rate,
            outcomes,
        }
    }
}

/// Append-only bounded record store
pub struct InterventionHistory {
    records: VecDeque<InterventionRecord>,
    capacity: usize,
}

impl InterventionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, record: InterventionRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterventionRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&InterventionRecord> {
        self.records.back()
    }

    /// Summarize history. A cycle counts as successful when more than half
    /// of its dispatched actions succeeded.
    pub fn report(&self, recent: usize) -> InterventionReport {
        let total = self.records.len();
        let successful = self
            .records
            .iter()
            .filter(|r| r.success_rate > 0.5)
            .count();

        let mut strategy_distribution: HashMap<StrategyTier, usize> = HashMap::new();
        for record in &self.records {
            *strategy_distribution.entry(record.strategy).or_insert(0) += 1;
        }

        let average_intervention_score = if total > 0 {
            self.records.iter().map(|r| r.intervention_score).sum::<f64>() / total as f64
        } else {
            0.0
        };

        InterventionReport {
            report_timestamp: Utc::now(),
            total_interventions: total,
            successful_interventions: successful,
            overall_success_rate: if total > 0 {
                successful as f64 / total as f64
            } else {
                0.0
            },
            strategy_distribution,
            average_intervention_score,
            recent: self
                .records
                .iter()
                .rev()
                .take(recent)
                .rev()
                .cloned()
                .collect(),
        }
    }
}

/// Aggregate report over recorded interventions
#[derive(Debug, Clone, Serialize)]
pub struct InterventionReport {
    pub report_timestamp: DateTime<Utc>,
    pub total_interventions: usize,
    pub successful_interventions: usize,
    pub overall_success_rate: f64,
    pub strategy_distribution: HashMap<StrategyTier, usize>,
    pub average_intervention_score: f64,
    /// Most recent records, oldest first
    pub recent: Vec<InterventionRecord>,
}
