//! Latest exchange-rate abstractions.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A point-in-time view of exchange rates for one base currency.
///
/// Rates are keyed by currency code; `BTreeMap` keeps iteration sorted
/// ascending by code for display.
#[derive(Debug, Clone)]
pub struct RatesSnapshot {
    pub last_updated_at: DateTime<Utc>,
    pub rates: BTreeMap<String, f64>,
}

#[async_trait]
pub trait RatesProvider: Send + Sync {
    /// Fetches the latest rates for `base`. An empty `currencies` slice
    /// requests the full rate table.
    async fn latest_rates(&self, base: &str, currencies: &[String]) -> Result<RatesSnapshot>;
}
