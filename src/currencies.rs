//! The `viewcurs` command: list the supported currencies.

use crate::catalog::CurrencyCatalog;
use anyhow::Result;

/// Formats the catalog as one `code name` row per currency, sorted by code.
pub fn format_listing(currency_catalog: &CurrencyCatalog) -> String {
    let mut output = String::new();
    for (code, name) in currency_catalog.entries() {
        output.push_str(&format!("{code:<10}{name}\n"));
    }
    output
}

pub fn run(currency_catalog: &CurrencyCatalog) -> Result<()> {
    print!("{}", format_listing(currency_catalog));
    Ok(())
}
