use crossbeam_channel::Sender;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::progress::ProgressTicker;
use crate::error::{IngestError, PecelError};
use crate::pipeline::context::{PipelineTuning, create_pipeline_channels};
use crate::pipeline::ingest::{ingest_counted, spawn_ingest_workers};
use crate::{FileRecord, RunStatistics};

/// Records and failures from the ingestion stage.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Successful records, in discovery order.
    pub records: Vec<FileRecord>,
    pub errors: Vec<IngestError>,
}

impl IngestOutcome {
    fn push(&mut self, result: Result<FileRecord, IngestError>) {
        match result {
            Ok(record) => self.records.push(record),
            Err(err) => self.errors.push(err),
        }
    }

    /// Restore discovery order after an unordered collection. Relative paths compare
    /// component by component, which is the order the walk produced them in.
    fn sort(&mut self) {
        self.records
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        self.errors.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

/// Ingest on the caller's thread, in `paths` order. Failures are kept and skipped.
pub fn ingest_sequential(
    paths: &[PathBuf],
    root: &Path,
    stats: &RunStatistics,
    progress: &mut ProgressTicker,
) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();
    for (i, path) in paths.iter().enumerate() {
        debug!("Processing file {}/{}: {}", i + 1, paths.len(), path.display());
        outcome.push(ingest_counted(path, root, stats));
        progress.tick();
    }
    outcome
}

/// Producer: feed every path into the work queue, then close it by dropping the sender.
/// Returns the number of paths dispatched.
fn spawn_producer(paths: Vec<PathBuf>, path_tx: Sender<PathBuf>) -> JoinHandle<usize> {
    thread::spawn(move || {
        let mut sent = 0_usize;
        for path in paths {
            if path_tx.send(path).is_err() {
                break;
            }
            sent += 1;
        }
        drop(path_tx);
        sent
    })
}

/// Fan `paths` out to `tuning.num_threads` workers and collect on this thread until every
/// worker has exited. Results are re-sorted into discovery order before returning.
pub fn ingest_parallel(
    paths: Vec<PathBuf>,
    root: &Path,
    tuning: &PipelineTuning,
    stats: &Arc<RunStatistics>,
    progress: &mut ProgressTicker,
) -> Result<IngestOutcome, PecelError> {
    let total = paths.len();
    let channels = create_pipeline_channels(tuning);

    let worker_handles = spawn_ingest_workers(
        &channels.path_rx,
        &channels.result_tx,
        root,
        stats,
        tuning.num_threads,
    );
    // Workers hold the only receivers / senders from here on; the queues close when they exit.
    drop(channels.path_rx);
    drop(channels.result_tx);

    let producer = spawn_producer(paths, channels.path_tx);

    let mut outcome = IngestOutcome::default();
    while let Ok(result) = channels.result_rx.recv() {
        outcome.push(result);
        progress.tick();
    }
    debug!(
        "collector: channel closed, {} records, {} errors",
        outcome.records.len(),
        outcome.errors.len()
    );

    let sent = producer
        .join()
        .map_err(|_| PecelError::WorkerPanicked("producer"))?;
    let mut panicked = false;
    for h in worker_handles {
        panicked |= h.join().is_err();
    }
    if panicked || sent != total || outcome.records.len() + outcome.errors.len() != total {
        return Err(PecelError::WorkerPanicked("ingest worker"));
    }

    outcome.sort();
    Ok(outcome)
}

/// Pick the execution strategy for `tuning` and ingest every candidate.
pub fn run_ingestion(
    paths: Vec<PathBuf>,
    root: &Path,
    tuning: &PipelineTuning,
    stats: &Arc<RunStatistics>,
    show_progress: bool,
) -> Result<IngestOutcome, PecelError> {
    let mut progress = ProgressTicker::new(show_progress, paths.len());
    let outcome = if tuning.is_sequential() {
        debug!("Ingesting {} files sequentially", paths.len());
        Ok(ingest_sequential(&paths, root, stats, &mut progress))
    } else {
        debug!(
            "Ingesting {} files with {} workers",
            paths.len(),
            tuning.num_threads
        );
        ingest_parallel(paths, root, tuning, stats, &mut progress)
    };
    progress.finish();
    outcome
}
