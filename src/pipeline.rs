//! Ingestion pipeline boundary.
//!
//! The pipeline (extraction, chunking, embedding, collection writes) lives
//! in the host application and is opaque to this tool: one call per file,
//! success or an error message. On success the host is expected to have
//! created or replaced the `file-{id}` collection.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::models::FileRecord;

/// The single effectful capability: (re)index one file.
#[async_trait]
pub trait IngestionPipeline: Send + Sync {
    /// Run the host's ingestion pipeline for `file`. Errors are per-record:
    /// the driver records them and moves on.
    async fn reindex(&self, file: &FileRecord) -> Result<()>;
}

/// [`IngestionPipeline`] calling the host application's process-file
/// endpoint over HTTP with an admin bearer token.
pub struct HttpPipeline {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpPipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build pipeline HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl IngestionPipeline for HttpPipeline {
    async fn reindex(&self, file: &FileRecord) -> Result<()> {
        let url = format!("{}/process/file", self.base_url);

        let body = serde_json::json!({
            "file_id": file.id,
            "user_id": file.user_id,
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Pipeline unreachable for file {}", file.id))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            if detail.trim().is_empty() {
                anyhow::bail!("Pipeline returned {} for file {}", status, file.id);
            }
            anyhow::bail!(
                "Pipeline returned {} for file {}: {}",
                status,
                file.id,
                detail.trim()
            );
        }

        Ok(())
    }
}
