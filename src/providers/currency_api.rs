use crate::rates_provider::{RatesProvider, RatesSnapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Client for the currencyapi-style latest-rates REST API.
pub struct CurrencyApiProvider {
    base_url: String,
    api_key: String,
}

impl CurrencyApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        CurrencyApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    meta: LatestMeta,
    data: BTreeMap<String, RateItem>,
}

#[derive(Debug, Deserialize)]
struct LatestMeta {
    last_updated_at: String,
}

#[derive(Debug, Deserialize)]
struct RateItem {
    code: String,
    value: f64,
}

#[async_trait]
impl RatesProvider for CurrencyApiProvider {
    async fn latest_rates(&self, base: &str, currencies: &[String]) -> Result<RatesSnapshot> {
        let mut url = format!(
            "{}/latest?apikey={}&base_currency={}",
            self.base_url, self.api_key, base
        );
        if !currencies.is_empty() {
            url.push_str("&currencies=");
            url.push_str(&currencies.join(","));
        }
        debug!("Requesting latest rates for {} from {}", base, self.base_url);

        let client = reqwest::Client::builder()
            .user_agent("cviewer/1.0")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request error while fetching rates for base: {base}"))?;

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read rates response for base: {base}"))?;

        let data: LatestResponse = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse rates response for base {base}: '{text}'"))?;

        let last_updated_at: DateTime<Utc> =
            DateTime::parse_from_rfc3339(&data.meta.last_updated_at)
                .with_context(|| {
                    format!(
                        "Malformed last_updated_at timestamp in rates response: '{}'",
                        data.meta.last_updated_at
                    )
                })?
                .with_timezone(&Utc);

        let rates = data
            .data
            .into_values()
            .map(|item| (item.code, item.value))
            .collect();

        Ok(RatesSnapshot {
            last_updated_at,
            rates,
        })
    }
}
