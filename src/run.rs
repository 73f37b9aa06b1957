//! Run orchestration: validate → discover → ingest → serialize.

use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

use crate::engine::filter::FilterCriteria;
use crate::engine::tools::{validate_input_dir, validate_output_path};
use crate::error::PecelError;
use crate::output::write_output;
use crate::pipeline::walk::canonical_target;
use crate::pipeline::{PipelineTuning, WalkOpts, discover, report_skipped_paths, run_ingestion};
use crate::utils::temp_path_for;
use crate::{Opts, RunStatistics, RunSummary};

/// Validate everything that can fail before work begins. Returns the compiled criteria.
fn prepare(opts: &Opts) -> Result<FilterCriteria, PecelError> {
    let root = validate_input_dir(&opts.input)?;
    if !opts.dry_run {
        validate_output_path(&opts.output)?;
    }
    FilterCriteria::new(&root, &opts.filter)
}

/// Our own output (and its temp file) must never be ingested when it lives under the input.
fn own_output_paths(opts: &Opts) -> Vec<std::path::PathBuf> {
    if opts.dry_run {
        return Vec::new();
    }
    [opts.output.clone(), temp_path_for(&opts.output)]
        .iter()
        .filter_map(|p| canonical_target(p))
        .collect()
}

/// Combine the directory `opts.input` into `opts.output`.
///
/// Fatal errors (bad input, output location, pattern) are returned before anything is read;
/// per-file errors are logged and counted in the summary; an output write failure is fatal.
pub fn combine_dir(opts: &Opts) -> Result<RunSummary, PecelError> {
    let criteria = prepare(opts)?;
    let start = Instant::now();
    let stats = Arc::new(RunStatistics::new());

    let walk_opts = WalkOpts {
        follow_links: opts.follow_links,
        skip: own_output_paths(opts),
    };
    let discovery = discover(&criteria, &walk_opts, &stats);
    let candidates = discovery.paths.len();
    info!("Found {} files to process", candidates);

    let tuning = PipelineTuning::resolve(opts.workers, candidates);
    debug!("Pipeline tuning: {:?}", tuning);
    let outcome = run_ingestion(
        discovery.paths,
        criteria.root(),
        &tuning,
        &stats,
        opts.verbose,
    )?;
    report_skipped_paths(&discovery.errors, &outcome.errors);

    let mut snapshot = stats.snapshot(start.elapsed().as_secs_f64());

    let output_path = if opts.dry_run {
        None
    } else {
        snapshot.output_size = write_output(
            &opts.output,
            opts.format,
            opts.compress,
            &outcome.records,
            &snapshot,
        )?;
        Some(opts.output.clone())
    };

    Ok(RunSummary {
        stats: snapshot,
        candidates,
        discovery_errors: discovery.errors.len(),
        ingest_errors: outcome.errors.len(),
        output_path,
    })
}
