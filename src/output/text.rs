//! Plain text: header, one ruled section per file, summary footer.

use std::io::{self, BufWriter, Write};

use crate::engine::tools::{format_bytes, format_modified, generated_local};
use crate::output::sink::CountingWriter;
use crate::utils::config::{PackagePaths, RULER_WIDTH};
use crate::{FileRecord, StatsSnapshot};

pub fn render(records: &[FileRecord], stats: &StatsSnapshot, out: &mut dyn Write) -> io::Result<()> {
    let mut w = CountingWriter::new(BufWriter::new(out));
    let heavy = "=".repeat(RULER_WIDTH);
    let light = "-".repeat(RULER_WIDTH);

    writeln!(w, "{} Output", PackagePaths::get().title())?;
    writeln!(w, "Generated: {}", generated_local())?;
    writeln!(
        w,
        "Files: {} | Directories: {} | Total Size: {}\n",
        stats.files_processed,
        stats.directories,
        format_bytes(stats.total_bytes)
    )?;

    for record in records {
        writeln!(w, "\n{heavy}\n{}", record.display_path())?;
        writeln!(
            w,
            "Size: {} | Modified: {}",
            format_bytes(record.size_bytes),
            format_modified(record.modified_at)
        )?;
        writeln!(w, "{light}")?;
        w.write_all(record.content_str().as_bytes())?;
        writeln!(w, "\n{heavy}")?;
    }

    writeln!(w, "\n\n=== SUMMARY ===")?;
    writeln!(w, "Files processed: {}", stats.files_processed)?;
    writeln!(w, "Directories scanned: {}", stats.directories)?;
    writeln!(w, "Total input size: {}", format_bytes(stats.total_bytes))?;
    // bytes rendered before this line, uncompressed
    let streamed = w.written();
    writeln!(w, "Output size: {}", format_bytes(streamed))?;
    writeln!(w, "Processing time: {:.2} seconds", stats.duration_secs)?;
    w.flush()
}
