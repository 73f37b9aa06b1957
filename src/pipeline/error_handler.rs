use crate::error::{DiscoveryAccessError, IngestError};

/// Log per-item failures from the walk and ingestion. These never fail the run.
pub fn report_skipped_paths(discovery_errors: &[DiscoveryAccessError], ingest_errors: &[IngestError]) {
    for err in discovery_errors {
        log::warn!("{}", err);
    }
    for err in ingest_errors {
        log::warn!("{}", err);
    }
    let skipped = discovery_errors.len() + ingest_errors.len();
    if skipped > 0 {
        log::warn!(
            "Skipped {} paths due to permission errors or access issues",
            skipped
        );
    }
}
