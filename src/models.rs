//! Core data types for the resync run.
//!
//! These types describe the file records read from the host database and
//! the summary produced at the end of one driver invocation.

use serde::Serialize;

/// One file record from the host application's database. Read-only here;
/// the host owns the schema.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: String,
    pub user_id: String,
    pub filename: String,
    /// Extracted document text, if the host has any for this file.
    /// `None` or whitespace-only means the record is skipped.
    pub content: Option<String>,
}

impl FileRecord {
    /// Whether this record carries any text the pipeline could index.
    pub fn has_content(&self) -> bool {
        self.content
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Per-record classification made by the driver before any side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Record has no extracted content; nothing to index.
    SkipNoContent,
    /// Derived collection already exists and is non-empty.
    SkipAlreadyIndexed,
    /// Collection is missing or empty; the pipeline must be invoked.
    NeedsReindex,
}

/// A record whose pipeline call (or vector-store probe) failed.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub file_id: String,
    pub filename: String,
    pub error: String,
}

/// Counts and failure details for one driver invocation. Discarded at
/// process exit after being reported.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total: u64,
    pub processed: u64,
    pub skipped_no_content: u64,
    pub skipped_indexed: u64,
    pub failed: Vec<FailedFile>,
}

impl RunSummary {
    pub fn skipped(&self) -> u64 {
        self.skipped_no_content + self.skipped_indexed
    }

    pub fn failed_count(&self) -> u64 {
        self.failed.len() as u64
    }

    /// processed + skipped + failed must account for every record examined.
    pub fn accounted(&self) -> u64 {
        self.processed + self.skipped() + self.failed_count()
    }
}
