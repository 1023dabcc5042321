//! Store details REST API extraction.
//!
//! The API exposes a store count endpoint and a per-store endpoint. Both
//! require an `x-api-key` header.

use std::time::Duration;

use polars::prelude::DataFrame;
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::frame_builder::build_frame_from_records;
use crate::source::Source;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Field holding the count in the store count response.
const NUMBER_STORES_FIELD: &str = "number_stores";

/// Read the store count from the count endpoint's response body.
pub fn parse_store_count(body: &Value, url: &str) -> Result<u64> {
    body.get(NUMBER_STORES_FIELD)
        .and_then(Value::as_u64)
        .ok_or_else(|| IngestError::InvalidResponse {
            url: url.to_string(),
            reason: format!("missing integer field '{NUMBER_STORES_FIELD}'"),
        })
}

/// Build the per-store URL (`<base><n>`).
pub fn store_endpoint(base: &str, store_number: u64) -> String {
    format!("{base}{store_number}")
}

/// Stores fetched one by one from the REST API.
pub struct StoreApiSource {
    client: Client,
    number_stores_url: String,
    store_url: String,
    api_key: String,
}

impl StoreApiSource {
    /// Create a source with a blocking client.
    pub fn new(
        number_stores_url: impl Into<String>,
        store_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let number_stores_url = number_stores_url.into();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| IngestError::Network {
                url: number_stores_url.clone(),
                source,
            })?;
        Ok(Self {
            client,
            number_stores_url,
            store_url: store_url.into(),
            api_key: api_key.into(),
        })
    }

    fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .map_err(|source| IngestError::Network {
                url: url.to_string(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        response.json().map_err(|source| IngestError::Network {
            url: url.to_string(),
            source,
        })
    }

    /// Ask the API how many stores exist.
    pub fn store_count(&self) -> Result<u64> {
        let body = self.get_json(&self.number_stores_url)?;
        parse_store_count(&body, &self.number_stores_url)
    }

    fn fetch_store(&self, store_number: u64) -> Result<Map<String, Value>> {
        let url = store_endpoint(&self.store_url, store_number);
        match self.get_json(&url)? {
            Value::Object(record) => Ok(record),
            _ => Err(IngestError::InvalidResponse {
                url,
                reason: "store details must be a JSON object".to_string(),
            }),
        }
    }
}

impl Source for StoreApiSource {
    fn describe(&self) -> String {
        format!("store_api:{}", self.store_url)
    }

    fn extract(&self) -> Result<DataFrame> {
        let count = self.store_count()?;
        info!(stores = count, "fetching store details");
        let mut records = Vec::with_capacity(usize::try_from(count).unwrap_or_default());
        for store_number in 0..count {
            records.push(self.fetch_store(store_number)?);
            debug!(store_number, "fetched store");
        }
        build_frame_from_records(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_store_count() {
        let body = json!({"statusCode": 200, "number_stores": 451});
        assert_eq!(parse_store_count(&body, "u").unwrap(), 451);
    }

    #[test]
    fn test_parse_store_count_missing() {
        let err = parse_store_count(&json!({"message": "Forbidden"}), "u").unwrap_err();
        assert!(matches!(err, IngestError::InvalidResponse { .. }));
    }

    #[test]
    fn test_store_endpoint() {
        assert_eq!(
            store_endpoint("https://example.test/prod/store_details/", 7),
            "https://example.test/prod/store_details/7"
        );
    }
}
