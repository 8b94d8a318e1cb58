use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::api::PriceSource;
use crate::constants::{HTTP_CONNECT_TIMEOUT_SECS, HTTP_REQUEST_TIMEOUT_SECS};
use crate::errors::{Result, WalletError};

/// CoinCap v2 REST client for asset search and price history.
#[derive(Clone)]
pub struct CoinCapClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct AssetSearchResponse {
    data: Vec<AssetEntry>,
}

#[derive(Debug, Deserialize)]
struct AssetEntry {
    id: String,
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    data: Vec<HistoryPoint>,
}

#[derive(Debug, Deserialize)]
struct HistoryPoint {
    #[serde(rename = "priceUsd", deserialize_with = "f64_from_string")]
    price_usd: f64,
}

// CoinCap encodes numeric fields as JSON strings.
fn f64_from_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<f64>().map_err(serde::de::Error::custom)
}

impl CoinCapClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WalletError::api(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| WalletError::api(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WalletError::api(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WalletError::api(format!("Failed to parse response from {}: {}", url, e)))
    }
}

#[async_trait]
impl PriceSource for CoinCapClient {
    async fn resolve_asset_id(&self, symbol: &str) -> Result<Option<String>> {
        let url = format!("{}/assets", self.base_url);
        let response: AssetSearchResponse =
            self.get_json(&url, &[("search", symbol.to_string())]).await?;

        let id = response
            .data
            .into_iter()
            .find(|entry| entry.symbol.eq_ignore_ascii_case(symbol))
            .map(|entry| entry.id);

        if id.is_none() {
            debug!("No asset matched symbol {}", symbol);
        }
        Ok(id)
    }

    async fn window_price(
        &self,
        asset_id: &str,
        interval: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Option<f64>> {
        let url = format!("{}/assets/{}/history", self.base_url, asset_id);
        let response: HistoryResponse = self
            .get_json(
                &url,
                &[
                    ("interval", interval.to_string()),
                    ("start", start_ms.to_string()),
                    ("end", end_ms.to_string()),
                ],
            )
            .await?;

        // The last entry is the most recent sample in the window.
        Ok(response.data.last().map(|point| point.price_usd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_response() {
        let json = r#"{"data":[
            {"id":"bitcoin","rank":"1","symbol":"BTC","name":"Bitcoin"},
            {"id":"bitcoin-cash","rank":"20","symbol":"BCH","name":"Bitcoin Cash"}
        ]}"#;
        let response: AssetSearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].id, "bitcoin");
        assert_eq!(response.data[0].symbol, "BTC");
    }

    #[test]
    fn parses_history_response_with_string_prices() {
        let json = r#"{"data":[
            {"priceUsd":"58000.1234","time":1617753600000},
            {"priceUsd":"60400.0000","time":1617753600500}
        ],"timestamp":1617753601000}"#;
        let response: HistoryResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data.last().unwrap().price_usd, 60400.0);
    }

    #[test]
    fn rejects_non_numeric_price() {
        let json = r#"{"data":[{"priceUsd":"not-a-number"}]}"#;
        let result: std::result::Result<HistoryResponse, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
