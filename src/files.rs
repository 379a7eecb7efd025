//! File-record source.
//!
//! [`FileStore`] is the narrow read capability the driver depends on;
//! [`SqliteFileStore`] implements it against the host application's `file`
//! table. The host stores extracted document text inside a `data` JSON
//! column, so content extraction happens here rather than in the driver.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::models::FileRecord;

/// Bulk read access to the host's file records.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Return every file record. One bulk read per run; ordering is
    /// whatever the store returns.
    async fn list_files(&self) -> Result<Vec<FileRecord>>;
}

/// [`FileStore`] over the host application's SQLite schema.
pub struct SqliteFileStore {
    pool: SqlitePool,
}

impl SqliteFileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for SqliteFileStore {
    async fn list_files(&self) -> Result<Vec<FileRecord>> {
        let rows = sqlx::query("SELECT id, user_id, filename, data FROM file")
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| {
                let data: Option<String> = row.get("data");
                FileRecord {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    filename: row.get("filename"),
                    content: data.as_deref().and_then(extract_content),
                }
            })
            .collect();

        Ok(records)
    }
}

/// Pull the extracted text out of the `data` JSON column.
///
/// Anything unusable (malformed JSON, missing key, non-string value) maps
/// to `None`, which the driver classifies as skip: no content.
fn extract_content(data: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    value
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
}
