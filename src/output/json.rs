//! JSON document: `{"metadata": {...}, "files": [...]}`, two-space indented.

use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};

use crate::engine::tools::{format_modified, generated_rfc3339};
use crate::utils::config::VERSION;
use crate::{FileRecord, StatsSnapshot};

#[derive(Serialize)]
struct JsonMetadata {
    generated: String,
    version: &'static str,
    files_count: usize,
    directories: usize,
    total_size: u64,
    duration_secs: f64,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: Cow<'a, str>,
    relative_path: String,
    size: u64,
    modified: String,
    content: Cow<'a, str>,
}

impl<'a> From<&'a FileRecord> for JsonFile<'a> {
    fn from(r: &'a FileRecord) -> Self {
        JsonFile {
            path: r.absolute_path.to_string_lossy(),
            relative_path: r.display_path(),
            size: r.size_bytes,
            modified: format_modified(r.modified_at),
            content: r.content_str(),
        }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    metadata: JsonMetadata,
    files: Vec<JsonFile<'a>>,
}

pub fn render(records: &[FileRecord], stats: &StatsSnapshot, out: &mut dyn Write) -> io::Result<()> {
    let doc = JsonDocument {
        metadata: JsonMetadata {
            generated: generated_rfc3339(),
            version: VERSION,
            files_count: stats.files_processed,
            directories: stats.directories,
            total_size: stats.total_bytes,
            duration_secs: stats.duration_secs,
        },
        files: records.iter().map(JsonFile::from).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    out.write_all(b"\n")?;
    out.flush()
}
