//! USD/VND exchange rate feed
//!
//! Primary source is the NY Fed markets endpoint, secondary is the free
//! exchangerate-api.com tier. When both fail the documented constant
//! fallback is substituted so downstream consumers never see a gap.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::{FeedError, FxRate, Result};

/// Constant USD/VND rate used when every upstream is unreachable
pub const FALLBACK_USD_VND: i64 = 25_100;

pub struct FxRateClient {
    client: reqwest::Client,
    primary_url: String,
    backup_url: String,
    fallback_rate: Decimal,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
    #[serde(default)]
    time_last_update_unix: i64,
}

impl FxRateClient {
    pub fn new(primary_url: &str, backup_url: &str, fallback_rate: i64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            primary_url: primary_url.to_string(),
            backup_url: backup_url.to_string(),
            fallback_rate: Decimal::from(fallback_rate),
        })
    }

    /// Fetch the current rate, degrading through backup and constant
    /// fallback. This never fails: feed outages are absorbed here.
    pub async fn fetch(&self) -> FxRate {
        match self.fetch_from(&self.primary_url, "nyfed").await {
            Ok(rate) => return rate,
            Err(e) => warn!("Primary FX feed failed: {}", e),
        }

        match self.fetch_from(&self.backup_url, "exchangerate-api").await {
            Ok(rate) => return rate,
            Err(e) => warn!("Backup FX feed failed: {}", e),
        }

        debug!("Using fallback USD/VND rate {}", self.fallback_rate);
        FxRate {
            rate: self.fallback_rate,
            last_updated: Utc::now(),
            source: "fallback".to_string(),
        }
    }

    async fn fetch_from(&self, url: &str, source: &str) -> Result<FxRate> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Unavailable(format!(
                "{} returned {}",
                source,
                response.status()
            )));
        }

        let body: RatesResponse =
            response
                .json()
                .await
                .map_err(|e| FeedError::InvalidResponse {
                    provider: source.to_string(),
                    detail: e.to_string(),
                })?;

        let vnd = body
            .rates
            .get("VND")
            .copied()
            .ok_or_else(|| FeedError::InvalidResponse {
                provider: source.to_string(),
                detail: "no VND rate in response".to_string(),
            })?;

        let rate = Decimal::try_from(vnd).map_err(|e| FeedError::InvalidResponse {
            provider: source.to_string(),
            detail: format!("rate not representable: {}", e),
        })?;

        let last_updated = if body.time_last_update_unix > 0 {
            Utc.timestamp_opt(body.time_last_update_unix, 0)
                .single()
                .unwrap_or_else(Utc::now)
        } else {
            Utc::now()
        };

        Ok(FxRate {
            rate,
            last_updated,
            source: source.to_string(),
        })
    }
}
