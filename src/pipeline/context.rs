//! Pipeline tuning and channels for the bounded fan-out / collector strategy.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use log::debug;
use std::path::PathBuf;

use crate::pipeline::ingest::IngestResult;
use crate::utils::config::{QUEUE_DEPTH_PER_WORKER, WorkerThreadLimits};
use crate::utils::fd_limit::max_workers_by_fd_limit;

/// Worker count and work-queue capacity for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineTuning {
    pub num_threads: usize,
    /// Capacity of the path (work) queue.
    pub channel_cap: usize,
}

impl PipelineTuning {
    /// Resolve the requested worker count: 0 means all available threads; the result is capped
    /// by the FD limit and by the number of candidates, and never drops below one.
    pub fn resolve(requested: usize, candidates: usize) -> Self {
        let limits = WorkerThreadLimits::current();
        let mut num_threads = if requested == 0 {
            limits.all_threads
        } else {
            requested
        };
        if let Some(fd_cap) = max_workers_by_fd_limit()
            && fd_cap < num_threads
        {
            debug!("Capping workers {} -> {} (FD limit ~80%)", num_threads, fd_cap);
            num_threads = fd_cap;
        }
        let num_threads = num_threads.min(candidates).max(limits.floor);
        Self {
            num_threads,
            channel_cap: num_threads * QUEUE_DEPTH_PER_WORKER,
        }
    }

    pub fn is_sequential(&self) -> bool {
        self.num_threads <= 1
    }
}

/// Work queue (producer → workers) and results queue (workers → collector).
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
    pub result_tx: Sender<IngestResult>,
    pub result_rx: Receiver<IngestResult>,
}

/// The path queue is bounded so the producer cannot run arbitrarily ahead of the workers.
/// The results queue is unbounded; the collector drains it concurrently.
pub fn create_pipeline_channels(tuning: &PipelineTuning) -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<PathBuf>(tuning.channel_cap);
    let (result_tx, result_rx) = unbounded::<IngestResult>();
    PipelineChannels {
        path_tx,
        path_rx,
        result_tx,
        result_rx,
    }
}
