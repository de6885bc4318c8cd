use contracts::domain::a001_fire_district::aggregate::{
    District, DistrictListItem, MISSING_NAME_PLACEHOLDER,
};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::shared::config::StoreConfig;

/// Upper bound the store accepts for `size` in a single search
pub const MAX_SEARCH_SIZE: usize = 1000;

/// Fields projected by `search`
const SEARCH_SOURCE_FIELDS: [&str; 2] = ["district_name", "created_at"];

/// Failures talking to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error saving to the document store (HTTP {status}): {body}")]
    Write { status: u16, body: String },

    #[error("Error fetching districts (HTTP {status}): {body}")]
    Read { status: u16, body: String },

    #[error("Error deleting (HTTP {status}): {body}")]
    Delete { status: u16, body: String },

    #[error("Document store unreachable: {0}")]
    Transport(String),

    #[error("Unexpected document store response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Transport(e.to_string())
    }
}

/// HTTP client for the fire district collection of the document store.
///
/// Every call is a single attempt with the transport's default timeout.
#[derive(Debug, Clone)]
pub struct DistrictStoreClient {
    client: reqwest::Client,
    config: StoreConfig,
}

impl DistrictStoreClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.collection,
            suffix
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("ApiKey {}", self.config.api_key))
            .header("Content-Type", "application/json")
    }

    /// POST /{collection}/_doc, returns the id assigned by the store
    pub async fn create(&self, district: &District) -> Result<String, StoreError> {
        let url = self.collection_url("_doc");
        tracing::debug!("POST {}", url);

        let response = self
            .authorized(self.client.post(&url))
            .json(district)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK && status != StatusCode::CREATED {
            tracing::error!("Document store create failed with {}: {}", status, body);
            return Err(StoreError::Write {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::Decode(format!("{}: {}", e, body)))?;
        Ok(created.id)
    }

    /// GET /{collection}/_search projecting name and creation time.
    ///
    /// Rows come back in the store's own order; no sort is requested.
    pub async fn search(&self, max_results: usize) -> Result<Vec<DistrictListItem>, StoreError> {
        let url = self.collection_url("_search");
        let size = max_results.min(MAX_SEARCH_SIZE);
        tracing::debug!("GET {} (size={})", url, size);

        let response = self
            .authorized(self.client.get(&url))
            .json(&json!({ "size": size, "_source": SEARCH_SOURCE_FIELDS }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!("Document store search failed with {}: {}", status, body);
            return Err(StoreError::Read {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::Decode(format!("{}: {}", e, body)))?;

        Ok(parsed.hits.hits.into_iter().map(Into::into).collect())
    }

    /// DELETE /{collection}/_doc/{id}; only an explicit 200 counts as success
    pub async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let url = self.collection_url(&format!("_doc/{}", urlencoding::encode(id)));
        tracing::debug!("DELETE {}", url);

        let response = self.authorized(self.client.delete(&url)).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await?;
            tracing::error!("Document store delete of {} failed with {}: {}", id, status, body);
            return Err(StoreError::Delete {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Response structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source", default)]
    source: HitSource,
}

#[derive(Debug, Default, Deserialize)]
struct HitSource {
    district_name: Option<String>,
    created_at: Option<String>,
}

impl From<SearchHit> for DistrictListItem {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.id,
            name: hit
                .source
                .district_name
                .unwrap_or_else(|| MISSING_NAME_PLACEHOLDER.to_string()),
            created_at: hit.source.created_at.unwrap_or_default(),
        }
    }
}
