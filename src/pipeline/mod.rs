//! Pipeline components: discovery walk, ingestion workers, execution strategy, error reporting.

pub mod context;
pub mod error_handler;
pub mod ingest;
pub mod orchestrator;
pub mod walk;

pub use context::{PipelineChannels, PipelineTuning, create_pipeline_channels};
pub use error_handler::report_skipped_paths;
pub use ingest::{IngestResult, ingest, spawn_ingest_workers};
pub use orchestrator::{IngestOutcome, ingest_parallel, ingest_sequential, run_ingestion};
pub use walk::{Discovery, WalkOpts, WalkOutcome, discover, run_walk_loop, to_outcome_walkdir};
