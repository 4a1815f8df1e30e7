pub mod cache;
pub mod proxies;
pub mod settings;
pub mod types;
pub mod sources {
    pub mod fx;
    pub mod swaps;
    pub mod vietnam_gold;
    pub mod world_gold;
}

pub use cache::SnapshotCache;
pub use settings::FeedSettings;
pub use sources::fx::FxRateClient;
pub use sources::swaps::SwapBook;
pub use sources::vietnam_gold::{GoldHubClient, GoldQuoteFeed, StaticQuoteFeed};
pub use sources::world_gold::WorldGoldClient;
pub use types::*;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{info, warn};

/// Assembles one immutable [`MarketSnapshot`] per cycle from all feeds.
///
/// Every feed failure is absorbed here and replaced by its documented
/// fallback, so consumers never observe partial data. Collected snapshots
/// are appended to a bounded rolling cache which also drives the
/// volatility index.
pub struct SnapshotCollector {
    gold_feed: Arc<dyn GoldQuoteFeed>,
    world_gold: WorldGoldClient,
    fx: FxRateClient,
    swaps: SwapBook,
    cache: SnapshotCache,
    reference_source: String,
    rng: StdRng,
}

impl SnapshotCollector {
    /// Build a collector from feed settings, selecting the domestic quote
    /// adapter by configuration.
    pub fn from_settings(settings: &FeedSettings) -> anyhow::Result<Self> {
        let gold_feed: Arc<dyn GoldQuoteFeed> = match settings.gold_feed.as_str() {
            "static" => Arc::new(StaticQuoteFeed::representative()),
            _ => Arc::new(GoldHubClient::new(&settings.gold_api_base)?),
        };

        Ok(Self::new(
            gold_feed,
            WorldGoldClient::new(&settings.world_gold_url, &settings.world_gold_api_key)?,
            FxRateClient::new(
                &settings.fed_fx_url,
                &settings.backup_fx_url,
                settings.fallback_usd_vnd,
            )?,
            SwapBook::simulated(),
            settings,
        ))
    }

    pub fn new(
        gold_feed: Arc<dyn GoldQuoteFeed>,
        world_gold: WorldGoldClient,
        fx: FxRateClient,
        swaps: SwapBook,
        settings: &FeedSettings,
    ) -> Self {
        Self {
            gold_feed,
            world_gold,
            fx,
            swaps,
            cache: SnapshotCache::new(settings.snapshot_retention),
            reference_source: settings.reference_source.clone(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Collect one snapshot. Infallible by design: every upstream outage
    /// degrades to a documented default.
    pub async fn collect(&mut self) -> MarketSnapshot {
        let quotes = match self.gold_feed.fetch_quotes().await {
            Ok(quotes) => {
                info!(
                    "Collected {} domestic quotes from {}",
                    quotes.len(),
                    self.gold_feed.name()
                );
                quotes
            }
            Err(e) => {
                warn!("Domestic gold feed failed: {}, continuing without quotes", e);
                Vec::new()
            }
        };

        let world_gold = match self.world_gold.fetch().await {
            Ok(world) => world,
            Err(e) => {
                warn!("World gold feed failed: {}, using fallback", e);
                WorldGold::fallback()
            }
        };

        let fx = self.fx.fetch().await;

        let snapshot = MarketSnapshot {
            timestamp: Utc::now(),
            quotes,
            world_gold,
            fx,
            swaps: self.swaps.operations().to_vec(),
            sentiment: proxies::simulate_sentiment(&mut self.rng),
            volatility_index: self.cache.volatility_index(&self.reference_source),
            liquidity: proxies::simulate_liquidity(&mut self.rng),
        };

        self.cache.push(snapshot.clone());
        snapshot
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }
}
