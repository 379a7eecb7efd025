//! # Vector Resync
//!
//! A one-shot maintenance utility that walks every file record in a host
//! application's database and regenerates any missing or empty per-file
//! vector collection by re-running the host's document ingestion pipeline.
//!
//! The tool owns no storage engine, no index, no embedding model, and no
//! vector database — it is a thin, idempotent control loop over three
//! external capabilities:
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌─────────────────┐
//! │  FileStore    │────▶│ ResyncDriver  │────▶│ IngestionPipeline│
//! │ (host SQLite) │     │ classify/loop │     │ (host HTTP API)  │
//! └──────────────┘     └──────┬────────┘     └─────────────────┘
//!                             │ exists + non-empty?
//!                             ▼
//!                      ┌──────────────┐
//!                      │ VectorStore  │
//!                      │ (REST probe) │
//!                      └──────────────┘
//! ```
//!
//! Each record is classified as *skip: no content*, *skip: already
//! indexed*, or *needs reindex*. Failed pipeline calls are recorded in the
//! run summary and never abort the pass, so the fix for a partial run is
//! simply to run the tool again.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | File records, classification, run summary |
//! | [`db`] | Read-only connection to the host database |
//! | [`files`] | `FileStore` trait + host-schema implementation |
//! | [`vector`] | `VectorStore` probe + collection naming |
//! | [`pipeline`] | Opaque ingestion pipeline call |
//! | [`resync`] | The resync driver and run report |
//! | [`mem`] | Periodic allocator release |
//! | [`progress`] | stderr progress reporting |

pub mod config;
pub mod db;
pub mod files;
pub mod mem;
pub mod models;
pub mod pipeline;
pub mod progress;
pub mod resync;
pub mod vector;
