//! Public and internal types for the pecel API and pipeline.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::SystemTime;

use crate::output::OutputFormat;

/// One ingested file. Built by the ingestor, then owned by the collector.
#[derive(Clone, Debug)]
pub struct FileRecord {
    /// Path as discovered (used to re-read the file).
    pub absolute_path: PathBuf,
    /// Path relative to the input root. Display and sort key.
    pub relative_path: PathBuf,
    /// Size in bytes from filesystem metadata.
    pub size_bytes: u64,
    pub modified_at: SystemTime,
    pub content: Vec<u8>,
}

impl FileRecord {
    /// Relative path with forward slashes, as written to every output format.
    pub fn display_path(&self) -> String {
        crate::engine::tools::path_to_display_string(&self.relative_path)
    }

    /// Content as UTF-8; invalid sequences are replaced.
    pub fn content_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// Raw filter settings as they come from CLI / config. Compiled into
/// [`FilterCriteria`](crate::engine::filter::FilterCriteria) before the walk.
#[derive(Clone, Debug)]
pub struct FilterOpts {
    /// Extension allow-list (e.g. `.go`). Empty or `*` means all files.
    pub extensions: Vec<String>,
    /// Skip names starting with `.` (or `~` plus at least one more char); prune such directories.
    pub exclude_hidden: bool,
    /// Upper size bound in bytes; 0 = unbounded.
    pub max_size: u64,
    /// Lower size bound in bytes; 0 = unbounded.
    pub min_size: u64,
    /// Regex matched against the relative path; a match rejects the file.
    pub exclude_pattern: Option<String>,
    /// Regex matched against the relative path; files must match when set.
    pub include_pattern: Option<String>,
}

impl Default for FilterOpts {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            exclude_hidden: true,
            max_size: 0,
            min_size: 0,
            exclude_pattern: None,
            include_pattern: None,
        }
    }
}

/// Full options for one run (CLI and lib).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Directory to combine.
    pub input: PathBuf,
    /// File to write. Written exactly as given; `.gz` naming is the caller's choice.
    pub output: PathBuf,
    pub filter: FilterOpts,
    pub format: OutputFormat,
    /// Gzip the output stream.
    pub compress: bool,
    /// Worker count. 1 = sequential on the caller's thread.
    pub workers: usize,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Discover and ingest, but do not write output.
    pub dry_run: bool,
    /// Show progress bar.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            output: PathBuf::from(crate::utils::config::DEFAULT_OUTPUT_FILE),
            filter: FilterOpts::default(),
            format: OutputFormat::Text,
            compress: false,
            workers: 1,
            follow_links: false,
            dry_run: false,
            verbose: false,
        }
    }
}

/// Counters shared by the walk and the ingestion workers. One per run.
///
/// Workers only touch it through atomic increments; read it with [`RunStatistics::snapshot`]
/// once ingestion has finished.
#[derive(Debug, Default)]
pub struct RunStatistics {
    files_processed: AtomicUsize,
    directories: AtomicUsize,
    total_bytes: AtomicU64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one successful ingestion of `size` bytes.
    pub fn record_file(&self, size: u64) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
        self.total_bytes.fetch_add(size, Ordering::Relaxed);
    }

    /// Count one directory visited during discovery.
    pub fn record_directory(&self) {
        self.directories.fetch_add(1, Ordering::Relaxed);
    }

    pub fn files_processed(&self) -> usize {
        self.files_processed.load(Ordering::Relaxed)
    }

    pub fn directories(&self) -> usize {
        self.directories.load(Ordering::Relaxed)
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes.load(Ordering::Relaxed)
    }

    /// Freeze the counters together with the elapsed time.
    pub fn snapshot(&self, duration_secs: f64) -> StatsSnapshot {
        StatsSnapshot {
            files_processed: self.files_processed(),
            directories: self.directories(),
            total_bytes: self.total_bytes(),
            duration_secs,
            output_size: 0,
        }
    }
}

/// Read-only view of [`RunStatistics`] handed to renderers and the summary reporter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub files_processed: usize,
    pub directories: usize,
    pub total_bytes: u64,
    pub duration_secs: f64,
    /// Bytes written to disk (after compression). 0 until the output is written.
    pub output_size: u64,
}

impl StatsSnapshot {
    /// Output size as a percentage of input size, when both are known.
    pub fn output_ratio(&self) -> Option<f64> {
        (self.output_size > 0 && self.total_bytes > 0)
            .then(|| self.output_size as f64 / self.total_bytes as f64 * 100.0)
    }
}

/// What a run hands back to its caller.
#[derive(Debug)]
pub struct RunSummary {
    pub stats: StatsSnapshot,
    /// Paths that survived discovery and were queued for ingestion.
    pub candidates: usize,
    /// Per-entry walk errors (recorded, never fatal).
    pub discovery_errors: usize,
    /// Per-file ingest errors (recorded, never fatal).
    pub ingest_errors: usize,
    /// Final output path, `None` on dry run.
    pub output_path: Option<PathBuf>,
}

impl RunSummary {
    /// True when files were found but none could be read.
    pub fn all_ingestion_failed(&self) -> bool {
        self.candidates > 0 && self.stats.files_processed == 0
    }
}
