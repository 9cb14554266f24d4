//! Supported-currency listing abstraction.

use anyhow::Result;
use async_trait::async_trait;

/// A currency known to the remote API: 3-letter code plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyEntry {
    pub code: String,
    pub name: String,
}

#[async_trait]
pub trait CurrencyListProvider: Send + Sync {
    async fn list_currencies(&self) -> Result<Vec<CurrencyEntry>>;
}
