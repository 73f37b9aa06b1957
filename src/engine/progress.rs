//! Progress bar utilities for displaying ingestion status

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

use crate::utils::config::ProgressConsts;

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Create a new progress bar configuration
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " files"
    )))
}

/// Update progress bar if available
/// Uses try_lock to avoid blocking if mutex is contended (non-blocking)
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Counts finished paths and pushes them to the bar every
/// [`ProgressConsts::PROGRESS_UPDATE_BATCH_SIZE`] items. A no-op without a bar.
pub struct ProgressTicker {
    bar: Option<ProgressBar>,
    pending: usize,
}

impl ProgressTicker {
    /// Build a ticker over `total` paths; shows a bar only when `enabled`.
    pub fn new(enabled: bool, total: usize) -> Self {
        let bar = (enabled && total > 0).then(|| {
            create_progress_bar(ProgressBarConfig::new(
                total,
                "Combining",
                Animation::Classic,
            ))
        });
        Self { bar, pending: 0 }
    }

    /// One path finished (ingested or failed).
    pub fn tick(&mut self) {
        let Some(bar) = &self.bar else { return };
        self.pending += 1;
        if self.pending >= ProgressConsts::PROGRESS_UPDATE_BATCH_SIZE {
            update_progress_bar(bar, self.pending);
            self.pending = 0;
        }
    }

    /// Flush the remainder and end the bar's line.
    pub fn finish(mut self) {
        if let Some(bar) = self.bar.take() {
            if self.pending > 0 {
                update_progress_bar(&bar, self.pending);
            }
            if let Ok(mut b) = bar.lock() {
                let _ = b.refresh();
            }
            eprintln!();
        }
    }
}
