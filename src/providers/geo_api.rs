use crate::conversion_provider::{Conversion, ConversionProvider};
use crate::listing_provider::{CurrencyEntry, CurrencyListProvider};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use tracing::debug;

/// Client for the getgeoapi-style currency REST API. Serves the
/// supported-currency listing and amount conversion.
pub struct GeoApiProvider {
    base_url: String,
    api_key: String,
}

impl GeoApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        GeoApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

// The API serializes numeric rate fields as JSON strings ("66.97").
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    currencies: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    updated_date: String,
    rates: BTreeMap<String, ConvertedRate>,
}

#[derive(Debug, Deserialize)]
struct ConvertedRate {
    #[serde(deserialize_with = "lenient_f64")]
    rate: f64,
    #[serde(deserialize_with = "lenient_f64")]
    rate_for_amount: f64,
}

#[async_trait]
impl CurrencyListProvider for GeoApiProvider {
    async fn list_currencies(&self) -> Result<Vec<CurrencyEntry>> {
        let url = format!(
            "{}/list?api_key={}&format=json",
            self.base_url, self.api_key
        );
        debug!("Requesting currency list from {}", self.base_url);

        let client = reqwest::Client::builder()
            .user_agent("cviewer/1.0")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .context("Request error while fetching the currency list")?;

        let text = response
            .text()
            .await
            .context("Failed to read the currency list response body")?;

        let data: ListResponse = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse currency list response: '{text}'"))?;

        debug!("Fetched {} supported currencies", data.currencies.len());

        Ok(data
            .currencies
            .into_iter()
            .map(|(code, name)| CurrencyEntry { code, name })
            .collect())
    }
}

#[async_trait]
impl ConversionProvider for GeoApiProvider {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion> {
        let url = format!(
            "{}/convert?api_key={}&from={}&to={}&amount={}&format=json",
            self.base_url, self.api_key, from, to, amount
        );
        debug!("Requesting conversion {} -> {} from {}", from, to, self.base_url);

        let client = reqwest::Client::builder()
            .user_agent("cviewer/1.0")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request error while converting {from} to {to}"))?;

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read conversion response for {from} to {to}"))?;

        let data: ConvertResponse = serde_json::from_str(&text).with_context(|| {
            format!("Failed to parse conversion response for {from} to {to}: '{text}'")
        })?;

        let target = data
            .rates
            .get(to)
            .ok_or_else(|| anyhow!("No conversion rate found for {} in the response", to))?;

        Ok(Conversion {
            updated_date: data.updated_date,
            rate: target.rate,
            rate_for_amount: target.rate_for_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_endpoint(endpoint: &str, mock_response: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_currency_list_fetch() {
        let mock_response = r#"{
            "currencies": {
                "EUR": "Euro",
                "USD": "United States Dollar",
                "CAD": "Canadian Dollar"
            }
        }"#;
        let mock_server = mock_endpoint("/list", mock_response, 200).await;

        let provider = GeoApiProvider::new(&mock_server.uri(), "test-key");
        let entries = provider.list_currencies().await.unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().any(|e| e.code == "USD" && e.name == "United States Dollar"));
    }

    #[tokio::test]
    async fn test_currency_list_sends_api_key() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list"))
            .and(query_param("api_key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"currencies": {}}"#))
            .mount(&mock_server)
            .await;

        let provider = GeoApiProvider::new(&mock_server.uri(), "secret");
        let entries = provider.list_currencies().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_currency_list_malformed_response() {
        let mock_server = mock_endpoint("/list", r#"{"unexpected": true}"#, 200).await;

        let provider = GeoApiProvider::new(&mock_server.uri(), "test-key");
        let result = provider.list_currencies().await;

        assert!(result.is_err());
        let error_message = format!("{:#}", result.unwrap_err());
        assert!(error_message.contains("Failed to parse currency list response"));
    }

    #[tokio::test]
    async fn test_successful_conversion_with_string_rates() {
        let mock_response = r#"{
            "updated_date": "2024-03-15",
            "base_currency_code": "USD",
            "amount": "50",
            "rates": {
                "KGS": {
                    "currency_name": "Kyrgystani Som",
                    "rate": "89.4562",
                    "rate_for_amount": "4472.8100"
                }
            }
        }"#;
        let mock_server = mock_endpoint("/convert", mock_response, 200).await;

        let provider = GeoApiProvider::new(&mock_server.uri(), "test-key");
        let conversion = provider.convert(50.0, "USD", "KGS").await.unwrap();

        assert_eq!(conversion.updated_date, "2024-03-15");
        assert!((conversion.rate - 89.4562).abs() < 1e-9);
        assert!((conversion.rate_for_amount - 4472.81).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_conversion_with_numeric_rates() {
        let mock_response = r#"{
            "updated_date": "2024-03-15",
            "rates": {
                "EUR": {"rate": 0.92, "rate_for_amount": 46.0}
            }
        }"#;
        let mock_server = mock_endpoint("/convert", mock_response, 200).await;

        let provider = GeoApiProvider::new(&mock_server.uri(), "test-key");
        let conversion = provider.convert(50.0, "USD", "EUR").await.unwrap();

        assert!((conversion.rate - 0.92).abs() < 1e-9);
        assert!((conversion.rate_for_amount - 46.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_conversion_missing_target_currency() {
        let mock_response = r#"{
            "updated_date": "2024-03-15",
            "rates": {}
        }"#;
        let mock_server = mock_endpoint("/convert", mock_response, 200).await;

        let provider = GeoApiProvider::new(&mock_server.uri(), "test-key");
        let result = provider.convert(50.0, "USD", "KGS").await;

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No conversion rate found for KGS in the response"
        );
    }

    #[tokio::test]
    async fn test_conversion_api_error_response() {
        let mock_server = mock_endpoint("/convert", "Server Error", 500).await;

        let provider = GeoApiProvider::new(&mock_server.uri(), "test-key");
        let result = provider.convert(50.0, "USD", "KGS").await;

        assert!(result.is_err());
        let error_message = format!("{:#}", result.unwrap_err());
        assert!(error_message.contains("Failed to parse conversion response"));
    }
}
