//! World gold price feed (goldprice.org JSON API)

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::types::{FeedError, Result, WorldGold};

pub struct WorldGoldClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct WorldGoldResponse {
    price: f64,
    /// Absolute 24h change
    #[serde(default)]
    ch: f64,
    /// 24h change percent
    #[serde(default)]
    chp: f64,
}

impl WorldGoldClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the current USD/oz price. Callers are expected to substitute
    /// [`WorldGold::fallback`] on error.
    pub async fn fetch(&self) -> Result<WorldGold> {
        let url = format!("{}/{}", self.base_url, self.api_key);
        debug!("Fetching world gold price");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Unavailable(format!(
                "world gold API returned {}",
                response.status()
            )));
        }

        let body: WorldGoldResponse =
            response
                .json()
                .await
                .map_err(|e| FeedError::InvalidResponse {
                    provider: "goldprice".to_string(),
                    detail: e.to_string(),
                })?;

        let price_usd =
            Decimal::try_from(body.price).map_err(|e| FeedError::InvalidResponse {
                provider: "goldprice".to_string(),
                detail: format!("price not representable: {}", e),
            })?;

        Ok(WorldGold {
            price_usd,
            change_24h: body.ch,
            change_percent: body.chp,
        })
    }
}
