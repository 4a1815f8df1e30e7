//! Feed configuration
//!
//! Loaded from an optional `MarketData.toml` plus `MARKET_DATA_`-prefixed
//! environment variables, so deployments override single keys without a
//! config file.

use serde::Deserialize;

use crate::sources::fx::FALLBACK_USD_VND;

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    /// Which domestic quote adapter to use: "hub" or "static"
    #[serde(default = "default_gold_feed")]
    pub gold_feed: String,
    #[serde(default = "default_gold_api_base")]
    pub gold_api_base: String,
    #[serde(default = "default_world_gold_url")]
    pub world_gold_url: String,
    #[serde(default)]
    pub world_gold_api_key: String,
    #[serde(default = "default_fed_fx_url")]
    pub fed_fx_url: String,
    #[serde(default = "default_backup_fx_url")]
    pub backup_fx_url: String,
    #[serde(default = "default_fallback_usd_vnd")]
    pub fallback_usd_vnd: i64,
    /// Dealer whose quote anchors volatility estimation
    #[serde(default = "default_reference_source")]
    pub reference_source: String,
    /// Rolling snapshot cache size
    #[serde(default = "default_snapshot_retention")]
    pub snapshot_retention: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            gold_feed: default_gold_feed(),
            gold_api_base: default_gold_api_base(),
            world_gold_url: default_world_gold_url(),
            world_gold_api_key: String::new(),
            fed_fx_url: default_fed_fx_url(),
            backup_fx_url: default_backup_fx_url(),
            fallback_usd_vnd: default_fallback_usd_vnd(),
            reference_source: default_reference_source(),
            snapshot_retention: default_snapshot_retention(),
        }
    }
}

impl FeedSettings {
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("MarketData").required(false))
            .add_source(config::Environment::with_prefix("MARKET_DATA"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_gold_feed() -> String {
    "hub".to_string()
}

fn default_gold_api_base() -> String {
    "http://localhost:5000".to_string()
}

fn default_world_gold_url() -> String {
    "https://goldprice.org/api/json".to_string()
}

fn default_fed_fx_url() -> String {
    "https://markets.newyorkfed.org/api/fxs/all/latest.json".to_string()
}

fn default_backup_fx_url() -> String {
    "https://api.exchangerate-api.com/v4/latest/USD".to_string()
}

fn default_fallback_usd_vnd() -> i64 {
    FALLBACK_USD_VND
}

fn default_reference_source() -> String {
    "SJC".to_string()
}

fn default_snapshot_retention() -> usize {
    100
}
