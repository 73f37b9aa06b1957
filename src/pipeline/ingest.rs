use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::UNIX_EPOCH;

use crate::engine::tools::path_relative_to;
use crate::error::{IngestError, IngestStage};
use crate::{FileRecord, RunStatistics};

/// Outcome of ingesting one candidate path.
pub type IngestResult = Result<FileRecord, IngestError>;

/// Read one file's metadata, then its whole content. Any failure discards the record.
pub fn ingest(abs_path: &Path, root: &Path) -> IngestResult {
    let fail = |stage, source| IngestError {
        path: abs_path.to_path_buf(),
        stage,
        source,
    };
    let meta = std::fs::metadata(abs_path).map_err(|e| fail(IngestStage::Stat, e))?;
    let modified_at = meta.modified().unwrap_or(UNIX_EPOCH);
    let relative_path =
        path_relative_to(abs_path, root).unwrap_or_else(|| abs_path.to_path_buf());
    let content = std::fs::read(abs_path).map_err(|e| fail(IngestStage::Read, e))?;
    Ok(FileRecord {
        absolute_path: abs_path.to_path_buf(),
        relative_path,
        size_bytes: meta.len(),
        modified_at,
        content,
    })
}

/// Ingest and count a success in `stats`.
pub fn ingest_counted(abs_path: &Path, root: &Path, stats: &RunStatistics) -> IngestResult {
    let result = ingest(abs_path, root);
    if let Ok(record) = &result {
        stats.record_file(record.size_bytes);
    }
    result
}

/// Single ingestion worker: read paths from path_rx, ingest, send every outcome on result_tx.
fn ingest_worker_loop(
    path_rx: Receiver<PathBuf>,
    result_tx: Sender<IngestResult>,
    root: PathBuf,
    stats: Arc<RunStatistics>,
) {
    while let Ok(abs_path) = path_rx.recv() {
        let result = ingest_counted(&abs_path, &root, &stats);
        if result_tx.send(result).is_err() {
            break;
        }
    }
    drop(result_tx);
}

/// Spawn ingestion workers. Caller must drop its own `result_tx` after this so the collector
/// sees the channel close once every worker exits.
pub fn spawn_ingest_workers(
    path_rx: &Receiver<PathBuf>,
    result_tx: &Sender<IngestResult>,
    root: &Path,
    stats: &Arc<RunStatistics>,
    num_threads: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_threads)
        .map(|_| {
            let path_rx = path_rx.clone();
            let result_tx = result_tx.clone();
            let root = root.to_path_buf();
            let stats = Arc::clone(stats);
            thread::spawn(move || ingest_worker_loop(path_rx, result_tx, root, stats))
        })
        .collect()
}
