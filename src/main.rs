//! # Vector Resync CLI (`resync`)
//!
//! One invocation performs one full scan-and-reindex pass over the host
//! application's file records. There are no operation flags: which records
//! get reindexed is decided entirely by the current state of the vector
//! store, which makes an interrupted run resumable by just running again.
//!
//! ## Usage
//!
//! ```bash
//! resync --config ./config/resync.toml
//! ```
//!
//! Progress lines go to stderr; the final summary goes to stdout. The exit
//! status is non-zero only if startup fails (config, database, or HTTP
//! client construction) — individual file failures are reported in the
//! summary instead.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use vector_resync::config;
use vector_resync::db;
use vector_resync::files::SqliteFileStore;
use vector_resync::pipeline::HttpPipeline;
use vector_resync::progress::ProgressMode;
use vector_resync::resync::{print_report, ResyncDriver};
use vector_resync::vector::HttpVectorStore;

/// Resync per-file vector collections against the host's ingestion pipeline.
#[derive(Parser)]
#[command(
    name = "resync",
    about = "One-shot resync of per-file vector collections",
    version,
    long_about = "Walks every file record in the host application's database and re-runs the \
    host's document ingestion pipeline for each record whose vector collection is missing or \
    empty. Already-indexed and contentless records are skipped, so the pass is idempotent and \
    an interrupted run can be resumed by running again."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, default_value = "./config/resync.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;

    // Startup: any failure here aborts with a non-zero exit before
    // anything is processed.
    let pool = db::connect(&cfg).await?;
    let files = Arc::new(SqliteFileStore::new(pool.clone()));
    let vectors = Arc::new(HttpVectorStore::new(&cfg.vector_store)?);
    let pipeline = Arc::new(HttpPipeline::new(&cfg.pipeline)?);

    let driver = ResyncDriver::new(files, vectors, pipeline, &cfg.resync)
        .with_progress(ProgressMode::default_for_tty().reporter());

    let started = Instant::now();
    let summary = driver.run().await?;
    print_report(&summary, started.elapsed());

    pool.close().await;
    Ok(())
}
