//! Currency conversion abstractions.

use anyhow::Result;
use async_trait::async_trait;

/// Result of converting an amount between two currencies.
///
/// `updated_date` is the API's own date string, printed verbatim.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub updated_date: String,
    pub rate: f64,
    pub rate_for_amount: f64,
}

#[async_trait]
pub trait ConversionProvider: Send + Sync {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion>;
}
