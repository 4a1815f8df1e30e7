//! End-to-end scan harness
//!
//! Validates the full cycle with a fixed snapshot provider, scripted
//! signal draws and a mock dispatcher:
//! collect -> extract -> score -> synthesize -> plan -> dispatch -> record

mod mock_dispatcher;

use async_trait::async_trait;
use chrono::Utc;
use mock_dispatcher::MockDispatcher;
use rust_decimal::Decimal;
use std::collections::HashMap;

use market_data::types::{
    FxRate, GoldQuote, Liquidity, MarketSnapshot, Sentiment, SentimentDirection, WorldGold,
};
use market_data::SwapBook;
use pressure_scanner::{
    ActionKind, ScanRunner, SequenceSignal, Settings, SnapshotProvider, StrategyTier,
};

/// Provider that hands out clones of one prepared snapshot
struct FixedProvider {
    snapshot: MarketSnapshot,
}

#[async_trait]
impl SnapshotProvider for FixedProvider {
    async fn collect(&mut self) -> MarketSnapshot {
        self.snapshot.clone()
    }
}

fn snapshot(sjc_buy: i64, sentiment_score: f64, volatility: f64) -> MarketSnapshot {
    MarketSnapshot {
        timestamp: Utc::now(),
        quotes: vec![
            GoldQuote::new("SJC", sjc_buy, sjc_buy + 45_000),
            GoldQuote::new("DOJI", sjc_buy - 150_000, sjc_buy - 80_000),
        ],
        world_gold: WorldGold {
            price_usd: Decimal::from(2650),
            change_24h: 0.0,
            change_percent: 0.0,
        },
        fx: FxRate {
            rate: Decimal::from(24_500),
            last_updated: Utc::now(),
            source: "fallback".to_string(),
        },
        swaps: SwapBook::simulated().operations().to_vec(),
        sentiment: Sentiment {
            overall_score: sentiment_score,
            direction: SentimentDirection::Neutral,
            confidence: 0.8,
            factors: HashMap::new(),
        },
        volatility_index: volatility,
        liquidity: Liquidity {
            overall_score: 0.6,
            bid_ask_spread: 45_000.0,
            market_depth: 0.6,
            trading_volume: 2_000_000_000.0,
        },
    }
}

fn runner_with(
    snapshot: MarketSnapshot,
    dispatcher: MockDispatcher,
    draws: impl IntoIterator<Item = f64>,
) -> ScanRunner {
    ScanRunner::new(
        Box::new(FixedProvider { snapshot }),
        Box::new(dispatcher),
        Box::new(SequenceSignal::new(draws)),
        Settings::default(),
    )
}

#[tokio::test]
async fn aggressive_cycle_dispatches_all_actions_in_priority_order() {
    let dispatcher = MockDispatcher::new();
    let dispatched = dispatcher.dispatched_handle();

    // strong momentum (0.95 -> 0.9), high volatility, clear arbitrage
    let mut runner = runner_with(
        snapshot(80_000_000, 0.25, 0.045),
        dispatcher,
        [0.95, 0.95, 0.9],
    );

    let result = runner.run_once().await.unwrap();

    // every condition fires: 0.30 + 0.25 + 0.20 + 0.15 + 0.10
    assert!((result.plan.intervention_score - 1.0).abs() < 1e-12);
    assert_eq!(result.plan.strategy, StrategyTier::AggressiveIntervention);
    assert_eq!(result.plan.reasons.len(), 5);

    let order = dispatched.lock().unwrap().clone();
    assert_eq!(
        order,
        vec![
            ActionKind::LaunchSpreadKiller,
            ActionKind::ExecuteArbitrageExploit,
            ActionKind::LiquidityInjection,
        ]
    );

    assert_eq!(runner.history().len(), 1);
    assert_eq!(result.success_rate, 1.0);
}

#[tokio::test]
async fn partial_dispatch_failure_is_recorded_not_fatal() {
    let dispatcher = MockDispatcher::failing([ActionKind::LiquidityInjection]);

    let mut runner = runner_with(
        snapshot(80_000_000, 0.25, 0.045),
        dispatcher,
        [0.95, 0.95, 0.9],
    );

    let result = runner.run_once().await.unwrap();

    assert!((result.success_rate - 2.0 / 3.0).abs() < 1e-12);
    let record = runner.history().latest().unwrap();
    assert_eq!(record.actions_executed, 3);
    assert_eq!(record.actions_successful, 2);
    assert!(!record.outcomes[2].success);
}

#[tokio::test]
async fn calm_cycle_monitors_without_touching_the_dispatcher() {
    let dispatcher = MockDispatcher::new();
    let dispatched = dispatcher.dispatched_handle();

    // weak momentum, low volatility, no arbitrage, neutral sentiment
    let mut runner = runner_with(snapshot(76_000_000, 0.5, 0.01), dispatcher, [0.5, 0.1, 0.1]);

    let result = runner.run_once().await.unwrap();

    assert_eq!(result.plan.strategy, StrategyTier::MonitorOnly);
    assert!(dispatched.lock().unwrap().is_empty());

    // the monitoring action is still recorded as locally initiated
    let record = runner.history().latest().unwrap();
    assert_eq!(record.actions_executed, 1);
    assert_eq!(record.success_rate, 1.0);
}

#[tokio::test]
async fn run_cycle_is_side_effect_free() {
    let dispatcher = MockDispatcher::new();
    let dispatched = dispatcher.dispatched_handle();

    let snap = snapshot(80_000_000, 0.25, 0.045);
    let mut runner = runner_with(snap.clone(), dispatcher, [0.95, 0.95, 0.9]);

    let plan = runner.run_cycle(&snap).unwrap();

    assert_eq!(plan.strategy, StrategyTier::AggressiveIntervention);
    assert_eq!(runner.history().len(), 0);
    assert!(dispatched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_snapshot_fails_the_cycle_without_recording() {
    let mut bad = snapshot(80_000_000, 0.5, 0.02);
    bad.quotes.push(GoldQuote {
        source: String::new(),
        buy: Decimal::from(1),
        sell: Decimal::from(1),
    });

    let mut runner = runner_with(bad, MockDispatcher::new(), [0.5, 0.5, 0.5]);

    assert!(runner.run_once().await.is_err());
    assert!(runner.history().is_empty());
}

#[tokio::test]
async fn repeated_cycles_accumulate_reportable_history() {
    let dispatcher = MockDispatcher::new();
    let mut runner = runner_with(
        snapshot(80_000_000, 0.25, 0.045),
        dispatcher,
        // same three draws every cycle once the sequence repeats its tail
        [0.95, 0.95, 0.9],
    );

    for _ in 0..3 {
        runner.run_once().await.unwrap();
    }

    let report = runner.report();
    assert_eq!(report.total_interventions, 3);
    assert_eq!(report.successful_interventions, 3);
    assert_eq!(
        report.strategy_distribution[&StrategyTier::AggressiveIntervention],
        3
    );
    assert!((report.average_intervention_score - 1.0).abs() < 1e-12);
    assert_eq!(report.recent.len(), 3);
}
