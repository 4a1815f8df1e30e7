//! Domestic gold quote feeds
//!
//! Two adapters behind one trait: the aggregate quote API used in
//! production, and a static book for offline runs. Which one the collector
//! uses is a configuration choice.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::{FeedError, GoldQuote, Result};

/// A source of domestic gold dealer quotes
#[async_trait]
pub trait GoldQuoteFeed: Send + Sync {
    /// Fetch the current quote list, ordered as published upstream
    async fn fetch_quotes(&self) -> Result<Vec<GoldQuote>>;

    /// Feed name for logging and health reporting
    fn name(&self) -> &str;
}

/// Client for the aggregate Vietnam gold price API
pub struct GoldHubClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct QuoteApiResponse {
    success: bool,
    data: QuoteApiData,
}

#[derive(Debug, Deserialize)]
struct QuoteApiData {
    #[serde(default)]
    prices: Vec<GoldQuote>,
}

impl GoldHubClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GoldQuoteFeed for GoldHubClient {
    async fn fetch_quotes(&self) -> Result<Vec<GoldQuote>> {
        let url = format!("{}/api/vietnam-gold/prices", self.base_url);
        debug!("Fetching domestic gold quotes from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Unavailable(format!(
                "gold quote API returned {}",
                response.status()
            )));
        }

        let body: QuoteApiResponse =
            response
                .json()
                .await
                .map_err(|e| FeedError::InvalidResponse {
                    provider: "gold-hub".to_string(),
                    detail: e.to_string(),
                })?;

        if !body.success {
            warn!("Gold quote API reported failure, returning empty quote list");
            return Ok(Vec::new());
        }

        Ok(body.data.prices)
    }

    fn name(&self) -> &str {
        "gold-hub"
    }
}

/// Fixed quote book for offline runs and tests
pub struct StaticQuoteFeed {
    quotes: Vec<GoldQuote>,
}

impl StaticQuoteFeed {
    pub fn new(quotes: Vec<GoldQuote>) -> Self {
        Self { quotes }
    }

    /// Representative dealer book around the usual SJC level
    pub fn representative() -> Self {
        Self::new(vec![
            GoldQuote::new("SJC", 80_000_000, 80_045_000),
            GoldQuote::new("DOJI", 79_850_000, 79_920_000),
            GoldQuote::new("PNJ", 79_700_000, 79_790_000),
        ])
    }
}

#[async_trait]
impl GoldQuoteFeed for StaticQuoteFeed {
    async fn fetch_quotes(&self) -> Result<Vec<GoldQuote>> {
        Ok(self.quotes.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn static_feed_returns_configured_quotes() {
        let feed = StaticQuoteFeed::representative();
        let quotes = feed.fetch_quotes().await.unwrap();

        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].source, "SJC");
        assert_eq!(quotes[0].spread(), Decimal::from(45_000));
    }
}
