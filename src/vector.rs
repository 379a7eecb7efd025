//! Vector-store probe.
//!
//! The driver only ever asks one question of the vector store: does the
//! collection derived from a file id exist, and does it hold at least one
//! point? Population happens as a side effect of the pipeline call, never
//! from here.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::VectorStoreConfig;

/// Derive the collection name for a file record.
///
/// The host application names standalone file collections `file-{id}`.
pub fn collection_name(file_id: &str) -> String {
    format!("file-{}", file_id)
}

/// Existence/non-emptiness probe against the external vector store.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// `true` only if the collection exists **and** holds at least one
    /// point. A missing or empty collection both mean "needs reindex".
    async fn collection_exists(&self, name: &str) -> Result<bool>;
}

/// [`VectorStore`] over the store's REST API.
///
/// `GET {base_url}/collections/{name}` — 404 means absent; 200 returns a
/// JSON body whose `result.points_count` says whether it is populated.
pub struct HttpVectorStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVectorStore {
    pub fn new(config: &VectorStoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build vector-store HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl VectorStore for HttpVectorStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let url = format!("{}/collections/{}", self.base_url, name);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Vector store unreachable: {}", url))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }

        if !resp.status().is_success() {
            anyhow::bail!(
                "Vector store returned {} for collection '{}'",
                resp.status(),
                name
            );
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .with_context(|| format!("Invalid vector-store response for '{}'", name))?;

        let points = body
            .get("result")
            .and_then(|r| r.get("points_count"))
            .and_then(|p| p.as_u64())
            .unwrap_or(0);

        Ok(points > 0)
    }
}
