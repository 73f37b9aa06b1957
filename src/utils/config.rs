//! Application configuration constants.
//! Defaults and tuning in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    title: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            let mut title = pkg.to_string();
            if let Some(first) = title.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                title,
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Implicit config file looked up in the current directory (e.g. `.pecel.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Capitalized package name used in output headers (e.g. `Pecel`).
    pub fn title(&self) -> &str {
        &self.title
    }
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output file when none is given.
pub const DEFAULT_OUTPUT_FILE: &str = "combined.txt";

/// Suffix for the in-progress output file renamed over the target on success.
pub const TEMP_SUFFIX: &str = "tmp";

/// Suffix appended to the output name when compressing (CLI policy).
pub const GZIP_SUFFIX: &str = "gz";

// ---- Worker threads ----

/// Worker count limits for the parallel strategy.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); used when the caller asks for auto (0).
    pub all_threads: usize,
    /// Floor: never fewer than one worker.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0,
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}

// ---- Pipeline ----

/// Work queue slots per worker. The producer blocks once this many paths are pending per worker.
pub const QUEUE_DEPTH_PER_WORKER: usize = 64;

// ---- Progress ----

/// Progress bar tuning.
pub struct ProgressConsts;

impl ProgressConsts {
    /// Records between progress bar refreshes.
    pub const PROGRESS_UPDATE_BATCH_SIZE: usize = 10;
}

// ---- Rendering ----

/// Width of the `=` / `-` rulers in text output.
pub const RULER_WIDTH: usize = 80;

/// Timestamp layout for file modification times.
pub const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
