//! PancakeSwap info API price client

use async_trait::async_trait;
use chrono::Utc;
use ethers::types::Address;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::PriceOracle;
use crate::shared::config::DEFAULT_PRICE_API_URL;
use crate::shared::errors::OracleError;
use crate::shared::types::ReferencePrice;

#[derive(Debug, Deserialize)]
struct TokenPriceResponse {
    updated_at: u64,
    data: TokenPriceData,
}

#[derive(Debug, Deserialize)]
struct TokenPriceData {
    #[allow(dead_code)]
    name: String,
    #[allow(dead_code)]
    symbol: String,
    /// USD price, unused by this engine.
    #[allow(dead_code)]
    price: String,
    #[serde(rename = "price_BNB")]
    price_bnb: String,
}

/// Price oracle backed by `GET {base}/tokens/{address}`
pub struct PancakePriceClient {
    http_client: Client,
    base_url: String,
}

impl PancakePriceClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_PRICE_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for PancakePriceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceOracle for PancakePriceClient {
    async fn fetch_reference_price(&self, token: Address) -> Result<ReferencePrice, OracleError> {
        let url = format!("{}/tokens/{:?}", self.base_url, token);
        info!("Fetching reference price from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| OracleError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OracleError::Http(format!(
                "price index returned status {}",
                response.status()
            )));
        }

        let body: TokenPriceResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Malformed(e.to_string()))?;

        Ok(ReferencePrice {
            price_bnb: body.data.price_bnb,
            updated_at_ms: body.updated_at,
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_shape_parses() {
        let raw = r#"{
            "updated_at": 1639000000000,
            "data": {
                "name": "Bitcoin City Coin",
                "symbol": "BITC",
                "price": "0.7",
                "price_BNB": "0.002"
            }
        }"#;
        let parsed: TokenPriceResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data.price_bnb, "0.002");
        assert_eq!(parsed.updated_at, 1_639_000_000_000);
    }

    #[test]
    fn missing_price_field_is_malformed() {
        let raw = r#"{ "updated_at": 1, "data": { "name": "x", "symbol": "X", "price": "1" } }"#;
        assert!(serde_json::from_str::<TokenPriceResponse>(raw).is_err());
    }
}
