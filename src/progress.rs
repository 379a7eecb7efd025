//! Resync progress reporting.
//!
//! Progress lines go to **stderr** so stdout stays reserved for the final
//! summary block. Reindexed files get one line each (with position and
//! percentage); skipped files are batched into a heartbeat line so a
//! mostly-indexed database does not flood the terminal.

use std::io::Write;

/// A single progress event emitted by the driver.
#[derive(Clone, Debug)]
pub enum ResyncProgressEvent {
    /// Bulk read of file records is in flight. Total unknown.
    Scanning,
    /// A file classified as needs-reindex is being handed to the pipeline.
    Reindexing {
        n: u64,
        total: u64,
        file_id: String,
        filename: String,
    },
    /// Periodic heartbeat while skipping already-indexed or empty records.
    Heartbeat {
        n: u64,
        total: u64,
        processed: u64,
        skipped: u64,
    },
}

/// Reports resync progress. Implementations write to stderr.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ResyncProgressEvent);
}

/// Human-friendly lines: `[12/340 - 3.5%] reindexing report.pdf (file-id)`.
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: ResyncProgressEvent) {
        let line = match &event {
            ResyncProgressEvent::Scanning => "resync  scanning file records...\n".to_string(),
            ResyncProgressEvent::Reindexing {
                n,
                total,
                file_id,
                filename,
            } => {
                format!(
                    "[{}/{} - {:.1}%] reindexing {} ({})\n",
                    n,
                    format_number(*total),
                    percent(*n, *total),
                    filename,
                    file_id
                )
            }
            ResyncProgressEvent::Heartbeat {
                n,
                total,
                processed,
                skipped,
            } => {
                format!(
                    "[{}/{} - {:.1}%] processed: {}, skipped: {}\n",
                    n,
                    format_number(*total),
                    percent(*n, *total),
                    processed,
                    skipped
                )
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ResyncProgressEvent) {
        let obj = match &event {
            ResyncProgressEvent::Scanning => serde_json::json!({
                "event": "progress",
                "phase": "scanning"
            }),
            ResyncProgressEvent::Reindexing {
                n,
                total,
                file_id,
                filename,
            } => serde_json::json!({
                "event": "progress",
                "phase": "reindexing",
                "n": n,
                "total": total,
                "file_id": file_id,
                "filename": filename
            }),
            ResyncProgressEvent::Heartbeat {
                n,
                total,
                processed,
                skipped,
            } => serde_json::json!({
                "event": "progress",
                "phase": "heartbeat",
                "n": n,
                "total": total,
                "processed": processed,
                "skipped": skipped
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ResyncProgressEvent) {}
}

fn percent(n: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (n as f64 / total as f64) * 100.0
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build a reporter for this mode. Caller passes it to the driver.
    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
