//! The resync driver.
//!
//! Walks every file record in the host database, classifies each one
//! (skip: no content, skip: already indexed, needs reindex), invokes the
//! host's ingestion pipeline for the last group, and produces a
//! [`RunSummary`]. Per-record failures are recorded and never abort the
//! run; re-running the driver is always safe because the vector store's
//! current state is the only checkpoint.
//!
//! Processing is strictly sequential. The pipeline is memory-heavy per
//! call, so one record at a time bounds peak RSS, and the driver releases
//! allocator pages every `cleanup_interval` processed records.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ResyncConfig;
use crate::files::FileStore;
use crate::mem;
use crate::models::{Classification, FailedFile, FileRecord, RunSummary};
use crate::pipeline::IngestionPipeline;
use crate::progress::{NoProgress, ProgressReporter, ResyncProgressEvent};
use crate::vector::{collection_name, VectorStore};

/// Hook invoked on the cleanup cadence. Defaults to
/// [`mem::release_transient`]; tests swap in a counter.
pub type CleanupHook = Box<dyn Fn() + Send + Sync>;

pub struct ResyncDriver {
    files: Arc<dyn FileStore>,
    vectors: Arc<dyn VectorStore>,
    pipeline: Arc<dyn IngestionPipeline>,
    cleanup_interval: usize,
    progress_interval: usize,
    progress: Box<dyn ProgressReporter>,
    cleanup: CleanupHook,
}

impl ResyncDriver {
    pub fn new(
        files: Arc<dyn FileStore>,
        vectors: Arc<dyn VectorStore>,
        pipeline: Arc<dyn IngestionPipeline>,
        config: &ResyncConfig,
    ) -> Self {
        Self {
            files,
            vectors,
            pipeline,
            cleanup_interval: config.cleanup_interval,
            progress_interval: config.progress_interval,
            progress: Box::new(NoProgress),
            cleanup: Box::new(mem::release_transient),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cleanup_hook(mut self, hook: CleanupHook) -> Self {
        self.cleanup = hook;
        self
    }

    /// Run one full scan-and-reindex pass.
    ///
    /// Errors out only if the bulk read of file records fails — nothing
    /// has been processed at that point and the run cannot proceed. Every
    /// later failure is per-record and lands in the summary instead.
    pub async fn run(&self) -> Result<RunSummary> {
        self.progress.report(ResyncProgressEvent::Scanning);

        let records = self
            .files
            .list_files()
            .await
            .context("Failed to list file records from the host database")?;

        let total = records.len() as u64;
        let mut summary = RunSummary {
            total,
            ..Default::default()
        };

        for (i, record) in records.iter().enumerate() {
            let n = (i + 1) as u64;

            match self.classify(record).await {
                Ok(Classification::SkipNoContent) => {
                    summary.skipped_no_content += 1;
                    self.heartbeat(n, total, &summary);
                }
                Ok(Classification::SkipAlreadyIndexed) => {
                    summary.skipped_indexed += 1;
                    self.heartbeat(n, total, &summary);
                }
                Ok(Classification::NeedsReindex) => {
                    self.progress.report(ResyncProgressEvent::Reindexing {
                        n,
                        total,
                        file_id: record.id.clone(),
                        filename: record.filename.clone(),
                    });

                    match self.pipeline.reindex(record).await {
                        Ok(()) => {
                            summary.processed += 1;
                            if summary.processed % self.cleanup_interval as u64 == 0 {
                                (self.cleanup)();
                            }
                        }
                        Err(e) => self.record_failure(&mut summary, record, &e),
                    }
                }
                // Probe failures are per-record too: one flaky lookup must
                // not take down the whole pass.
                Err(e) => self.record_failure(&mut summary, record, &e),
            }
        }

        Ok(summary)
    }

    async fn classify(&self, record: &FileRecord) -> Result<Classification> {
        if !record.has_content() {
            return Ok(Classification::SkipNoContent);
        }

        let name = collection_name(&record.id);
        if self.vectors.collection_exists(&name).await? {
            Ok(Classification::SkipAlreadyIndexed)
        } else {
            Ok(Classification::NeedsReindex)
        }
    }

    fn record_failure(&self, summary: &mut RunSummary, record: &FileRecord, err: &anyhow::Error) {
        eprintln!(
            "Warning: failed to reindex {} ({}): {:#}",
            record.filename, record.id, err
        );
        summary.failed.push(FailedFile {
            file_id: record.id.clone(),
            filename: record.filename.clone(),
            error: format!("{:#}", err),
        });
    }

    fn heartbeat(&self, n: u64, total: u64, summary: &RunSummary) {
        if n % self.progress_interval as u64 == 0 {
            self.progress.report(ResyncProgressEvent::Heartbeat {
                n,
                total,
                processed: summary.processed,
                skipped: summary.skipped(),
            });
        }
    }
}

/// Print the end-of-run report on stdout.
///
/// The failed list is capped at the first 10 entries; the rest is a count.
pub fn print_report(summary: &RunSummary, elapsed: Duration) {
    println!("resync");
    println!("  files examined: {}", summary.total);
    println!("  reindexed: {}", summary.processed);
    println!("  skipped (no content): {}", summary.skipped_no_content);
    println!("  skipped (already indexed): {}", summary.skipped_indexed);
    println!("  failed: {}", summary.failed_count());
    println!("  elapsed: {:.1}s", elapsed.as_secs_f64());

    if !summary.failed.is_empty() {
        println!("Failed files:");
        for failed in summary.failed.iter().take(10) {
            println!(
                "  - {} ({}): {}",
                failed.filename, failed.file_id, failed.error
            );
        }
        if summary.failed.len() > 10 {
            println!("  ... and {} more", summary.failed.len() - 10);
        }
    }

    println!("ok");
}
