//! Serializers for the combined artifact.
//!
//! Every format consumes the same ordered record list plus a [`StatsSnapshot`] and streams
//! into a [`Write`]. [`write_output`] adds the optional gzip layer, counts the bytes that
//! actually reach disk, and publishes the file atomically.

pub mod json;
pub mod markdown;
pub mod sink;
pub mod text;
pub mod xml;

use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::PecelError;
use crate::utils::{remove_stale_temp, rename_temp_to_final, temp_path_for};
use crate::{FileRecord, StatsSnapshot};
use sink::CountingWriter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Xml,
    Markdown,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Xml,
        OutputFormat::Markdown,
    ];

    /// Canonical name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
            OutputFormat::Markdown => "md",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = PecelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(PecelError::InvalidFormat(s.to_string())),
        }
    }
}

/// Render `records` in `format` into `out`.
pub fn render(
    format: OutputFormat,
    records: &[FileRecord],
    stats: &StatsSnapshot,
    out: &mut dyn Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => text::render(records, stats, out),
        OutputFormat::Json => json::render(records, stats, out),
        OutputFormat::Xml => xml::render(records, stats, out),
        OutputFormat::Markdown => markdown::render(records, stats, out),
    }
}

/// Render into memory (uncompressed).
pub fn render_to_vec(
    format: OutputFormat,
    records: &[FileRecord],
    stats: &StatsSnapshot,
) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    render(format, records, stats, &mut buf)?;
    Ok(buf)
}

/// Render and gzip into `file`. Returns bytes written to the file.
fn write_stream(
    file: File,
    format: OutputFormat,
    compress: bool,
    records: &[FileRecord],
    stats: &StatsSnapshot,
) -> io::Result<u64> {
    let mut counted = BufWriter::new(CountingWriter::new(file));
    if compress {
        let mut gz = GzEncoder::new(&mut counted, Compression::default());
        render(format, records, stats, &mut gz)?;
        gz.finish()?;
    } else {
        render(format, records, stats, &mut counted)?;
    }
    let counter = counted.into_inner().map_err(|e| e.into_error())?;
    let (file, written) = counter.into_parts();
    file.sync_all()?;
    Ok(written)
}

/// Write the artifact to `path`, gzip-compressed when `compress` is set.
///
/// Output goes to a temp file beside `path` that is renamed over it on success, so a failed
/// run never leaves a partial file at `path`. Returns the on-disk size in bytes (after
/// compression).
pub fn write_output(
    path: &Path,
    format: OutputFormat,
    compress: bool,
    records: &[FileRecord],
    stats: &StatsSnapshot,
) -> Result<u64, PecelError> {
    let temp_path = temp_path_for(path);
    remove_stale_temp(&temp_path).map_err(|e| PecelError::write(&temp_path, e))?;
    let file = File::create(&temp_path).map_err(|e| PecelError::write(&temp_path, e))?;

    match write_stream(file, format, compress, records, stats) {
        Ok(written) => {
            if let Err(e) = rename_temp_to_final(&temp_path, path) {
                let _ = std::fs::remove_file(&temp_path);
                return Err(e);
            }
            debug!(
                "wrote {} bytes ({}{}) to {}",
                written,
                format,
                if compress { ", gzip" } else { "" },
                path.display()
            );
            Ok(written)
        }
        Err(e) => {
            let _ = std::fs::remove_file(&temp_path);
            Err(PecelError::write(path, e))
        }
    }
}
