//! Discovery walk: deterministic pre-order traversal that prunes hidden directories and
//! applies the predicate filter to every file.

use log::debug;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::RunStatistics;
use crate::engine::filter::FilterCriteria;
use crate::error::DiscoveryAccessError;

/// One result from the directory walk: an entry to consider or an access error.
pub enum WalkOutcome {
    Ok(DirEntry),
    Err(DiscoveryAccessError),
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => WalkOutcome::Ok(entry),
        Err(err) => WalkOutcome::Err(err.into()),
    }
}

/// Result of [`discover`]: candidate files in discovery order plus the per-entry errors.
#[derive(Debug, Default)]
pub struct Discovery {
    pub paths: Vec<PathBuf>,
    pub directories: usize,
    pub errors: Vec<DiscoveryAccessError>,
}

/// Walk settings that are not part of the filter itself.
#[derive(Clone, Debug, Default)]
pub struct WalkOpts {
    pub follow_links: bool,
    /// Paths never treated as candidates (the output file and its temp file).
    pub skip: Vec<PathBuf>,
}

/// Size of a non-directory entry. Symlinks are resolved so a broken link surfaces here as an
/// access error. Returns `Ok(None)` for a link that resolves to a directory.
fn file_size(entry: &DirEntry) -> Result<Option<u64>, DiscoveryAccessError> {
    let meta = if entry.path_is_symlink() {
        std::fs::metadata(entry.path()).map_err(|e| DiscoveryAccessError {
            path: Some(entry.path().to_path_buf()),
            message: e.to_string(),
        })?
    } else {
        entry.metadata()?
    };
    Ok((!meta.is_dir()).then(|| meta.len()))
}

fn walkdir_iter(
    criteria: &FilterCriteria,
    follow_links: bool,
) -> impl Iterator<Item = WalkOutcome> + '_ {
    WalkDir::new(criteria.root())
        .follow_links(follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| !(e.file_type().is_dir() && criteria.prunes_dir(e.path())))
        .map(to_outcome_walkdir)
}

/// Run the walk loop over `iter`: count directories, filter files, record errors.
/// Never aborts on a per-entry error.
pub fn run_walk_loop<I>(
    iter: I,
    criteria: &FilterCriteria,
    skip: &[PathBuf],
    stats: &RunStatistics,
) -> Discovery
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut discovery = Discovery::default();
    for outcome in iter {
        let entry = match outcome {
            WalkOutcome::Ok(entry) => entry,
            WalkOutcome::Err(err) => {
                discovery.errors.push(err);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            discovery.directories += 1;
            stats.record_directory();
            continue;
        }
        if skip.iter().any(|s| s.as_path() == entry.path()) {
            debug!("skipping own output {}", entry.path().display());
            continue;
        }
        match file_size(&entry) {
            Ok(Some(size)) => {
                if criteria.accept(entry.path(), size) {
                    discovery.paths.push(entry.into_path());
                }
            }
            Ok(None) => debug!("not following directory link {}", entry.path().display()),
            Err(err) => discovery.errors.push(err),
        }
    }
    discovery
}

/// Discover candidate files under the criteria's root, in lexicographic pre-order.
/// Every directory visited (root included, pruned ones excluded) is counted in `stats`.
pub fn discover(criteria: &FilterCriteria, opts: &WalkOpts, stats: &RunStatistics) -> Discovery {
    let iter = walkdir_iter(criteria, opts.follow_links);
    let discovery = run_walk_loop(iter, criteria, &opts.skip, stats);
    debug!(
        "walk done: {} candidates, {} directories, {} errors",
        discovery.paths.len(),
        discovery.directories,
        discovery.errors.len()
    );
    discovery
}

/// Canonical form of a path that may not exist yet (parent canonicalized, file name kept).
pub fn canonical_target(path: &Path) -> Option<PathBuf> {
    if let Ok(p) = path.canonicalize() {
        return Some(p);
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Some(parent.canonicalize().ok()?.join(path.file_name()?))
}
