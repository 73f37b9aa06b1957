//! Cap on ingestion workers derived from the open-file soft limit (`RLIMIT_NOFILE`).

/// Descriptors one ingest worker may hold at once: the file being read plus slack.
pub const FDS_PER_WORKER: usize = 2;

/// Share of the soft limit handed to workers, as a ratio; the rest stays free for stdio,
/// the output file and its temp sibling.
const USABLE_NUMERATOR: u64 = 4;
const USABLE_DENOMINATOR: u64 = 5;

/// Soft limit on open descriptors, `None` when unlimited or unknown.
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    let mut rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: `rlim` is a valid, writable rlimit for the duration of the call.
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rlim) } != 0 {
        return None;
    }
    #[allow(clippy::useless_conversion)]
    let soft = u64::from(rlim.rlim_cur);
    (rlim.rlim_cur != libc::RLIM_INFINITY && soft <= i64::MAX as u64).then_some(soft)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Workers that fit in `limit` descriptors; never below one.
fn workers_for_limit(limit: u64) -> usize {
    let usable = limit.saturating_mul(USABLE_NUMERATOR) / USABLE_DENOMINATOR;
    let workers = usable / FDS_PER_WORKER as u64;
    usize::try_from(workers).unwrap_or(usize::MAX).max(1)
}

/// Worker ceiling for this process, `None` when the limit is unknown.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    max_open_fds().map(workers_for_limit)
}
