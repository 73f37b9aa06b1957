use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PecelError;
use crate::utils::config::TEMP_SUFFIX;

/// Get the temporary path the output is rendered into before the final rename.
pub fn temp_path_for(output_path: &Path) -> PathBuf {
    let name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| crate::utils::config::DEFAULT_OUTPUT_FILE.to_string());
    output_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!(".{name}.{TEMP_SUFFIX}"))
}

/// Remove a stale temp file left by an interrupted run. Missing file is fine.
pub fn remove_stale_temp(temp_path: &Path) -> std::io::Result<()> {
    match fs::remove_file(temp_path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Move the finished temp file over the final output path.
pub fn rename_temp_to_final(temp_path: &Path, final_path: &Path) -> Result<(), PecelError> {
    fs::rename(temp_path, final_path).map_err(|e| {
        log::debug!(
            "atomic rename temp output to final path failed ({} -> {})",
            temp_path.display(),
            final_path.display()
        );
        PecelError::write(final_path, e)
    })
}
