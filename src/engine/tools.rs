//! Path, validation and formatting utilities

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::PecelError;
use crate::utils::config::MODIFIED_FORMAT;

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Relative path as written to output: forward slashes on every platform.
pub fn path_to_display_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Input must exist and be a directory. Returns the canonical root.
pub fn validate_input_dir(path: &Path) -> Result<PathBuf, PecelError> {
    let invalid = |reason: &str| PecelError::InvalidInput {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let meta = std::fs::metadata(path).map_err(|_| invalid("directory does not exist"))?;
    if !meta.is_dir() {
        return Err(invalid("path is not a directory"));
    }
    path.canonicalize().map_err(|e| invalid(&e.to_string()))
}

/// Output must sit in an existing directory and must not itself be a directory.
pub fn validate_output_path(path: &Path) -> Result<(), PecelError> {
    let invalid = |reason: String| PecelError::InvalidOutput {
        path: path.to_path_buf(),
        reason,
    };
    if path.is_dir() {
        return Err(invalid("output path is a directory".into()));
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match std::fs::metadata(parent) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(invalid(format!(
            "parent path is not a directory: {}",
            parent.display()
        ))),
        Err(_) => Err(invalid(format!(
            "parent directory does not exist: {}",
            parent.display()
        ))),
    }
}

/// Human-readable size, 1024-based (`512 B`, `1.5 KB`, `3.0 MB`).
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let unit = b"KMGTPE"[exp] as char;
    format!("{:.1} {}B", bytes as f64 / div as f64, unit)
}

/// File modification time in local time (`2024-01-31 18:04:05`).
pub fn format_modified(t: SystemTime) -> String {
    DateTime::<Local>::from(t).format(MODIFIED_FORMAT).to_string()
}

/// Document generation time, RFC 3339.
pub fn generated_rfc3339() -> String {
    Local::now().to_rfc3339()
}

/// Document generation time for text headers.
pub fn generated_local() -> String {
    Local::now().format(MODIFIED_FORMAT).to_string()
}
