//! Scanner configuration
//!
//! Thresholds, loop timing, history retention and the named heuristic
//! constants. Loaded from an optional `Scanner.toml` plus `SCANNER__`
//! prefixed environment variables (e.g.
//! `SCANNER__THRESHOLDS__HIGH_SPREAD_THRESHOLD=60000`).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub heuristics: Heuristics,
    #[serde(default)]
    pub cycle: CycleSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub dispatch: DispatchSettings,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("Scanner").required(false))
            .add_source(config::Environment::with_prefix("SCANNER").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Decision thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    /// Predicted spread above this flags intervention, VND
    #[serde(default = "default_high_spread_threshold")]
    pub high_spread_threshold: f64,
    /// Volatility index marking a strained market
    #[serde(default = "default_volatility_trigger")]
    pub volatility_trigger: f64,
    /// Smallest VND gap worth recommending a trade on
    #[serde(default = "default_arbitrage_minimum")]
    pub arbitrage_minimum: f64,
    /// Aggregate score required for the aggressive tier
    #[serde(default = "default_intervention_confidence")]
    pub intervention_confidence_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high_spread_threshold: default_high_spread_threshold(),
            volatility_trigger: default_volatility_trigger(),
            arbitrage_minimum: default_arbitrage_minimum(),
            intervention_confidence_threshold: default_intervention_confidence(),
        }
    }
}

/// Undocumented numeric heuristics inherited with the scoring formulas.
/// Kept as named configuration; no derivation is claimed for any of them.
#[derive(Debug, Clone, Deserialize)]
pub struct Heuristics {
    /// Dealer whose quote anchors feature extraction
    #[serde(default = "default_reference_source")]
    pub reference_source: String,
    /// Reference buy price assumed when no quote is available, VND
    #[serde(default = "default_reference_price")]
    pub default_reference_price: f64,
    /// Divisor turning the price-in-millions feature into a trend factor
    #[serde(default = "default_price_trend_base")]
    pub price_trend_base: f64,
    /// Assumed current dealer spread, VND
    #[serde(default = "default_baseline_spread")]
    pub baseline_spread: f64,
    /// Spread prediction bounds, VND
    #[serde(default = "default_spread_floor")]
    pub spread_floor: f64,
    #[serde(default = "default_spread_ceiling")]
    pub spread_ceiling: f64,
    /// Profit estimate at a full arbitrage score, VND
    #[serde(default = "default_max_arbitrage_profit")]
    pub max_arbitrage_profit: f64,
    /// FX rate delta per overnight pressure point
    #[serde(default = "default_swap_pressure_fx_delta")]
    pub swap_pressure_fx_delta: f64,
    /// Weight of VND liquidity pressure relative to USD swaps (inverse)
    #[serde(default = "default_vnd_pressure_factor")]
    pub vnd_pressure_factor: f64,
    /// Taels per troy ounce (37.5 g tael / 31.1035 g ounce)
    #[serde(default = "default_tael_per_troy_ounce")]
    pub tael_per_troy_ounce: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            reference_source: default_reference_source(),
            default_reference_price: default_reference_price(),
            price_trend_base: default_price_trend_base(),
            baseline_spread: default_baseline_spread(),
            spread_floor: default_spread_floor(),
            spread_ceiling: default_spread_ceiling(),
            max_arbitrage_profit: default_max_arbitrage_profit(),
            swap_pressure_fx_delta: default_swap_pressure_fx_delta(),
            vnd_pressure_factor: default_vnd_pressure_factor(),
            tael_per_troy_ounce: default_tael_per_troy_ounce(),
        }
    }
}

/// Scan loop timing
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CycleSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Shortened wait after a failed cycle
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            error_backoff_secs: default_error_backoff_secs(),
        }
    }
}

/// History retention
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HistorySettings {
    /// Intervention records kept in the ring buffer
    #[serde(default = "default_retention")]
    pub retention: usize,
    /// Records included in a report
    #[serde(default = "default_report_interventions")]
    pub report_interventions: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            retention: default_retention(),
            report_interventions: default_report_interventions(),
        }
    }
}

/// Action dispatch
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_dispatch_timeout_secs")]
    pub timeout_secs: u64,
    /// Plans scoring below this are recorded but not dispatched
    #[serde(default = "default_min_dispatch_score")]
    pub min_dispatch_score: f64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_dispatch_timeout_secs(),
            min_dispatch_score: default_min_dispatch_score(),
        }
    }
}

fn default_high_spread_threshold() -> f64 { 50_000.0 }
fn default_volatility_trigger() -> f64 { 0.03 }
fn default_arbitrage_minimum() -> f64 { 20_000.0 }
fn default_intervention_confidence() -> f64 { 0.75 }

fn default_reference_source() -> String { "SJC".to_string() }
fn default_reference_price() -> f64 { 80_000_000.0 }
fn default_price_trend_base() -> f64 { 80.0 }
fn default_baseline_spread() -> f64 { 45_000.0 }
fn default_spread_floor() -> f64 { 15_000.0 }
fn default_spread_ceiling() -> f64 { 80_000.0 }
fn default_max_arbitrage_profit() -> f64 { 30_000.0 }
fn default_swap_pressure_fx_delta() -> f64 { 0.00005 }
fn default_vnd_pressure_factor() -> f64 { -0.5 }
fn default_tael_per_troy_ounce() -> f64 { 37.5 / 31.1035 }

fn default_interval_secs() -> u64 { 120 }
fn default_error_backoff_secs() -> u64 { 60 }

fn default_retention() -> usize { 100 }
fn default_report_interventions() -> usize { 10 }

fn default_api_base() -> String { "http://localhost:5000".to_string() }
fn default_dispatch_timeout_secs() -> u64 { 10 }
fn default_min_dispatch_score() -> f64 { 0.3 }
