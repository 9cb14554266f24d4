//! The `convert` command: convert an amount between two currencies.

use crate::catalog::{self, CurrencyCatalog};
use crate::conversion_provider::{Conversion, ConversionProvider};
use crate::ui;
use anyhow::Result;
use tracing::{debug, info};

const INVALID_AMOUNT: &str = "The amount cannot be less or equal to 0.";

/// Returns the message to print instead of a conversion when the inputs
/// are invalid. Codes are expected to be uppercased already.
fn rejection_message(
    amount: f64,
    from: &str,
    to: &str,
    currency_catalog: &CurrencyCatalog,
) -> Option<String> {
    if amount <= 0.0 {
        return Some(INVALID_AMOUNT.to_string());
    }
    if !currency_catalog.is_supported(from) {
        return Some(catalog::unsupported_message(from));
    }
    if !currency_catalog.is_supported(to) {
        return Some(catalog::unsupported_message(to));
    }
    None
}

/// Formats a conversion as three fixed-width labelled lines.
pub fn format_conversion(conversion: &Conversion) -> String {
    format!(
        "{:<20}{}\n{:<20}{:.6}\n{:<20}{:.6}\n",
        "Updated date:",
        conversion.updated_date,
        "Rate",
        conversion.rate,
        "Rate for amount",
        conversion.rate_for_amount,
    )
}

pub async fn run(
    provider: &dyn ConversionProvider,
    currency_catalog: &CurrencyCatalog,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<()> {
    let from = from.to_uppercase();
    let to = to.to_uppercase();

    if let Some(message) = rejection_message(amount, &from, &to, currency_catalog) {
        info!("Rejected conversion input");
        println!("{}", ui::style_text(&message, ui::StyleType::Error));
        return Ok(());
    }

    let conversion = provider.convert(amount, &from, &to).await?;
    debug!("The data obtained from API: {conversion:?}");

    print!("{}", format_conversion(&conversion));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn catalog_with(lines: &str) -> (tempfile::TempDir, CurrencyCatalog) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("currencies.txt");
        fs::write(&path, lines).unwrap();
        let currency_catalog = CurrencyCatalog::load(&path).unwrap();
        (dir, currency_catalog)
    }

    #[test]
    fn test_format_conversion() {
        let conversion = Conversion {
            updated_date: "2024-03-15".to_string(),
            rate: 89.4562,
            rate_for_amount: 4472.81,
        };

        let expected = "\
Updated date:       2024-03-15
Rate                89.456200
Rate for amount     4472.810000
";
        assert_eq!(format_conversion(&conversion), expected);
    }

    #[test]
    fn test_rejection_for_negative_amount() {
        let (_dir, currency_catalog) = catalog_with("KGS=Kyrgystani Som\nUSD=US Dollar\n");
        let message = rejection_message(-50.0, "USD", "KGS", &currency_catalog);
        assert_eq!(
            message.as_deref(),
            Some("The amount cannot be less or equal to 0.")
        );
    }

    #[test]
    fn test_rejection_for_zero_amount() {
        let (_dir, currency_catalog) = catalog_with("KGS=Kyrgystani Som\nUSD=US Dollar\n");
        let message = rejection_message(0.0, "USD", "KGS", &currency_catalog);
        assert_eq!(
            message.as_deref(),
            Some("The amount cannot be less or equal to 0.")
        );
    }

    #[test]
    fn test_invalid_amount_wins_over_unsupported_currency() {
        let (_dir, currency_catalog) = catalog_with("USD=US Dollar\n");
        let message = rejection_message(0.0, "USD", "XYZ", &currency_catalog);
        assert_eq!(
            message.as_deref(),
            Some("The amount cannot be less or equal to 0.")
        );
    }

    #[test]
    fn test_rejection_for_unsupported_source_currency() {
        let (_dir, currency_catalog) = catalog_with("USD=US Dollar\n");
        let message = rejection_message(50.0, "ABC", "USD", &currency_catalog);
        assert_eq!(
            message.as_deref(),
            Some("The currency ABC is not supported.")
        );
    }

    #[test]
    fn test_rejection_for_unsupported_target_currency() {
        let (_dir, currency_catalog) = catalog_with("USD=US Dollar\n");
        let message = rejection_message(50.0, "USD", "ABC", &currency_catalog);
        assert_eq!(
            message.as_deref(),
            Some("The currency ABC is not supported.")
        );
    }

    #[test]
    fn test_no_rejection_for_valid_inputs() {
        let (_dir, currency_catalog) = catalog_with("KGS=Kyrgystani Som\nUSD=US Dollar\n");
        assert!(rejection_message(50.0, "USD", "KGS", &currency_catalog).is_none());
    }
}
