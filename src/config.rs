use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub vector_store: VectorStoreConfig,
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub resync: ResyncConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    /// Path to the host application's SQLite database. Opened read-only.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorStoreConfig {
    pub base_url: String,
    #[serde(default = "default_vector_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_vector_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    pub base_url: String,
    /// Admin credential passed as a bearer token on each pipeline call.
    pub api_key: String,
    #[serde(default = "default_pipeline_timeout_secs")]
    pub timeout_secs: u64,
}

// Ingestion (extraction + embedding + storage) can take minutes per file.
fn default_pipeline_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResyncConfig {
    /// Records between allocator releases while reindexing.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: usize,
    /// Skip-heartbeat cadence: one progress line per this many skipped
    /// records instead of one per record.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for ResyncConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: default_cleanup_interval(),
            progress_interval: default_progress_interval(),
        }
    }
}

fn default_cleanup_interval() -> usize {
    10
}

fn default_progress_interval() -> usize {
    100
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.vector_store.base_url.trim().is_empty() {
        anyhow::bail!("vector_store.base_url must not be empty");
    }
    if config.vector_store.timeout_secs == 0 {
        anyhow::bail!("vector_store.timeout_secs must be >= 1");
    }

    if config.pipeline.base_url.trim().is_empty() {
        anyhow::bail!("pipeline.base_url must not be empty");
    }
    if config.pipeline.timeout_secs == 0 {
        anyhow::bail!("pipeline.timeout_secs must be >= 1");
    }

    if config.resync.cleanup_interval == 0 {
        anyhow::bail!("resync.cleanup_interval must be >= 1");
    }
    if config.resync.progress_interval == 0 {
        anyhow::bail!("resync.progress_interval must be >= 1");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let f = write_config(
            r#"
[db]
path = "/data/webui.db"

[vector_store]
base_url = "http://127.0.0.1:6333"

[pipeline]
base_url = "http://127.0.0.1:8080/api/v1/retrieval"
api_key = "sk-test"
"#,
        );
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.vector_store.timeout_secs, 30);
        assert_eq!(cfg.pipeline.timeout_secs, 300);
        assert_eq!(cfg.resync.cleanup_interval, 10);
        assert_eq!(cfg.resync.progress_interval, 100);
    }

    #[test]
    fn zero_cleanup_interval_rejected() {
        let f = write_config(
            r#"
[db]
path = "/data/webui.db"

[vector_store]
base_url = "http://127.0.0.1:6333"

[pipeline]
base_url = "http://127.0.0.1:8080"
api_key = "sk-test"

[resync]
cleanup_interval = 0
"#,
        );
        let err = load_config(f.path()).unwrap_err();
        assert!(err.to_string().contains("cleanup_interval"));
    }

    #[test]
    fn empty_base_url_rejected() {
        let f = write_config(
            r#"
[db]
path = "/data/webui.db"

[vector_store]
base_url = ""

[pipeline]
base_url = "http://127.0.0.1:8080"
api_key = "sk-test"
"#,
        );
        assert!(load_config(f.path()).is_err());
    }
}
