//! Error taxonomy: fatal errors abort the run, per-item errors are recorded and skipped.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Config-class variants are raised before any work begins;
/// `Write` is raised after ingestion when the output cannot be produced.
#[derive(Debug, Error)]
pub enum PecelError {
    #[error("invalid input directory {path}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },
    #[error("invalid output path {path}: {reason}")]
    InvalidOutput { path: PathBuf, reason: String },
    #[error("invalid {which} pattern: {source}")]
    InvalidPattern {
        which: &'static str,
        source: regex::Error,
    },
    #[error("extension '{0}' should start with a dot (.) or be '*' for all files")]
    InvalidExtension(String),
    #[error("invalid output format '{0}' (expected text, json, xml, markdown or md)")]
    InvalidFormat(String),
    #[error("config file {path}: {reason}")]
    Config { path: PathBuf, reason: String },
    #[error("failed writing output {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),
}

impl PecelError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PecelError::Write {
            path: path.into(),
            source,
        }
    }
}

/// A walk entry that could not be read (permission denied, broken link, loop).
#[derive(Debug)]
pub struct DiscoveryAccessError {
    pub path: Option<PathBuf>,
    pub message: String,
}

impl fmt::Display for DiscoveryAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(p) => write!(f, "error accessing {}: {}", p.display(), self.message),
            None => write!(f, "error accessing <unknown>: {}", self.message),
        }
    }
}

impl From<walkdir::Error> for DiscoveryAccessError {
    fn from(err: walkdir::Error) -> Self {
        DiscoveryAccessError {
            path: err.path().map(PathBuf::from),
            message: err.to_string(),
        }
    }
}

/// Which step of ingestion failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestStage {
    Stat,
    Read,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestStage::Stat => f.write_str("stat"),
            IngestStage::Read => f.write_str("read"),
        }
    }
}

/// A candidate file that could not be ingested. The file is left out of the output.
#[derive(Debug, Error)]
#[error("error processing {} ({stage}): {source}", path.display())]
pub struct IngestError {
    pub path: PathBuf,
    pub stage: IngestStage,
    pub source: std::io::Error,
}
