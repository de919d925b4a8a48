//! Catalog lookups: display name plus slot to backend cosmetic id.
//!
//! One HTTP GET per resolution, no caching and no retry. The search endpoint
//! takes `name` and `backendType` query parameters and answers with a JSON
//! body holding a `data` array; the first element's `id` wins and the
//! service's own ordering breaks ties. Every failure mode (timeout, transport
//! error, non-success status, malformed payload, empty result set) resolves
//! to `None` after a local log line; resolution is always soft.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

use super::cosmetics::CosmeticSlot;
use crate::config::CatalogConfig;

/// Catalog search response structures
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
}

/// First-match policy over a search response.
pub fn first_id(response: SearchResponse) -> Option<String> {
    response.data.into_iter().next().map(|entry| entry.id)
}

/// Seam between the dispatcher and the catalog service, so command handling
/// can be exercised without network access.
#[async_trait]
pub trait CosmeticResolver: Send + Sync {
    async fn resolve(&self, display_name: &str, slot: CosmeticSlot) -> Option<String>;
}

/// HTTP-backed resolver against the configured search endpoint.
pub struct CatalogClient {
    config: CatalogConfig,
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Full query URL for a lookup; name is percent-encoded.
    pub fn build_query_url(&self, display_name: &str, slot: CosmeticSlot) -> String {
        format!(
            "{}?name={}&backendType={}",
            self.config.base_url,
            urlencoding::encode(display_name),
            slot.backend_type()
        )
    }

    async fn query(&self, display_name: &str, slot: CosmeticSlot) -> Result<SearchResponse> {
        let url = self.build_query_url(display_name, slot);
        debug!("catalog query: {}", url);

        let request = self.client.get(&url);
        let timeout_duration = Duration::from_secs(self.config.timeout_seconds as u64);

        let response = timeout(timeout_duration, request.send())
            .await
            .map_err(|_| anyhow!("request timeout after {}s", self.config.timeout_seconds))?
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("catalog returned status: {}", response.status()));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("failed to parse catalog response: {}", e))?;

        Ok(search)
    }
}

#[async_trait]
impl CosmeticResolver for CatalogClient {
    async fn resolve(&self, display_name: &str, slot: CosmeticSlot) -> Option<String> {
        match self.query(display_name, slot).await {
            Ok(search) => {
                let id = first_id(search);
                if id.is_none() {
                    debug!("no {} match for '{}'", slot, display_name);
                }
                id
            }
            Err(e) => {
                warn!("catalog lookup failed for '{}' ({}): {}", display_name, slot, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_wins() {
        let search: SearchResponse =
            serde_json::from_str(r#"{"data":[{"id":"A1"},{"id":"B2"}]}"#).unwrap();
        assert_eq!(first_id(search), Some("A1".to_string()));
    }

    #[test]
    fn empty_data_resolves_to_none() {
        let search: SearchResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert_eq!(first_id(search), None);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body = r#"{"status":200,"data":[{"id":"CID_0001","name":"Reaper","rarity":"rare"}]}"#;
        let search: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(first_id(search), Some("CID_0001".to_string()));
    }

    #[test]
    fn missing_data_array_is_malformed() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"result":true}"#).is_err());
    }

    #[test]
    fn query_url_encodes_name() {
        let client = CatalogClient::new(CatalogConfig::default());
        let url = client.build_query_url("Renegade Raider", CosmeticSlot::Outfit);
        assert!(url.ends_with("?name=Renegade%20Raider&backendType=AthenaCharacter"));
    }
}
