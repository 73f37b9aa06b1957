//! Pecel: combine the files of a directory tree into one text, JSON, XML or Markdown artifact.
//!
//! The work happens in three stages:
//!
//! 1. **Discover** ([`pipeline::discover`]): walk the input root in lexicographic pre-order,
//!    prune hidden directories, and keep the files the [`FilterCriteria`](engine::FilterCriteria)
//!    accepts.
//! 2. **Ingest** ([`pipeline::run_ingestion`]): read each candidate into a [`FileRecord`], on the
//!    caller's thread (`workers == 1`) or through a bounded fan-out of worker threads feeding a
//!    single collector. Parallel results are re-sorted, so the record order never depends on the
//!    worker count.
//! 3. **Serialize** ([`output::write_output`]): render the records and [`StatsSnapshot`] as
//!    text, JSON, XML or Markdown, optionally gzip-compressed.
//!
//! ```no_run
//! use pecel::{Opts, OutputFormat, combine_dir};
//!
//! let opts = Opts {
//!     input: "src".into(),
//!     output: "combined.md".into(),
//!     format: OutputFormat::Markdown,
//!     workers: 4,
//!     ..Default::default()
//! };
//! let summary = combine_dir(&opts)?;
//! println!("{} files, {} bytes written", summary.stats.files_processed, summary.stats.output_size);
//! # Ok::<(), pecel::PecelError>(())
//! ```

pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod run;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::{DiscoveryAccessError, IngestError, IngestStage, PecelError};
pub use output::OutputFormat;
pub use run::combine_dir;

/// Result alias used by the public pecel API
pub type Result<T> = std::result::Result<T, PecelError>;
