//! The `getrates` command: latest exchange rates for a base currency.

use crate::catalog::{self, CurrencyCatalog};
use crate::rates_provider::{RatesProvider, RatesSnapshot};
use crate::ui;
use anyhow::Result;
use tracing::{debug, info};

/// Returns the message to print instead of rates when an input code is
/// not in the catalog. Inputs are expected to be uppercased already.
fn rejection_message(
    base: &str,
    currencies: &[String],
    currency_catalog: &CurrencyCatalog,
) -> Option<String> {
    if !currency_catalog.is_supported(base) {
        return Some(catalog::unsupported_message(base));
    }
    currencies
        .iter()
        .find(|code| !currency_catalog.is_supported(code))
        .map(|code| catalog::unsupported_message(code))
}

/// Formats a rates snapshot as the printable block: a one-line header
/// followed by one `code value` row per rate, sorted by code ascending.
pub fn format_rates(base: &str, requested: &[String], snapshot: &RatesSnapshot) -> String {
    let date = snapshot.last_updated_at.format("%d.%m.%Y %H:%M");
    let mut output = match requested.len() {
        0 => format!("{base} rates at {date}\n"),
        1 => format!("{base} rate to {} at {date}\n", requested.join(", ")),
        _ => format!("{base} rates to {} at {date}\n", requested.join(", ")),
    };
    for (code, value) in &snapshot.rates {
        output.push_str(&format!("{code:<10}{value:.6}\n"));
    }
    output
}

pub async fn run(
    provider: &dyn RatesProvider,
    currency_catalog: &CurrencyCatalog,
    base: &str,
    currencies: &[String],
) -> Result<()> {
    let base = base.to_uppercase();
    let currencies: Vec<String> = currencies.iter().map(|c| c.to_uppercase()).collect();

    if let Some(message) = rejection_message(&base, &currencies, currency_catalog) {
        info!("User entered an unsupported currency");
        println!("{}", ui::style_text(&message, ui::StyleType::Error));
        return Ok(());
    }

    let mut snapshot = provider.latest_rates(&base, &currencies).await?;
    debug!("The data obtained from API: {snapshot:?}");

    // The API may return codes the catalog does not know about.
    snapshot.rates.retain(|code, _| currency_catalog.is_supported(code));

    print!("{}", format_rates(&base, &currencies, &snapshot));
    Ok(())
}
