pub mod catalog;
pub mod config;
pub mod conversion_provider;
pub mod convert;
pub mod currencies;
pub mod listing_provider;
pub mod log;
pub mod providers;
pub mod rates;
pub mod rates_provider;
pub mod ui;

use crate::catalog::CurrencyCatalog;
use crate::providers::currency_api::CurrencyApiProvider;
use crate::providers::geo_api::GeoApiProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Rates {
        base: String,
        currencies: Vec<String>,
    },
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    Currencies,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency viewer starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let geo_provider = GeoApiProvider::new(config.geo_base_url(), &config.geo_api_key()?);

    // The supported set is refreshed once per invocation and then read
    // only from memory.
    let cache_path = config.cache_path()?;
    let currency_catalog = CurrencyCatalog::sync(&geo_provider, &cache_path).await?;

    match command {
        AppCommand::Rates { base, currencies } => {
            let rates_provider = CurrencyApiProvider::new(
                config.currencyapi_base_url(),
                &config.currency_api_key()?,
            );
            rates::run(&rates_provider, &currency_catalog, &base, &currencies).await
        }
        AppCommand::Convert { amount, from, to } => {
            convert::run(&geo_provider, &currency_catalog, amount, &from, &to).await
        }
        AppCommand::Currencies => currencies::run(&currency_catalog),
    }
}
