//! Markdown: one `## File N` section per record with fenced content.

use std::io::{self, BufWriter, Write};

use crate::engine::filter::dotted_extension;
use crate::engine::tools::{format_bytes, format_modified, generated_local};
use crate::utils::config::PackagePaths;
use crate::{FileRecord, StatsSnapshot};

fn language_from_extension(ext: &str) -> &'static str {
    match ext {
        "rs" => "rust", "toml" => "toml", "json" => "json", "md" | "markdown" => "markdown",
        "txt" => "text", "html" | "htm" => "html", "css" => "css", "js" => "javascript",
        "ts" => "typescript", "py" => "python", "sh" | "bash" => "bash",
        "yml" | "yaml" => "yaml", "xml" => "xml", "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp", "go" => "go", "rb" => "ruby", "php" => "php",
        "swift" => "swift", "kt" | "kts" => "kotlin", "scala" => "scala", "dart" => "dart",
        "java" => "java", "sql" => "sql",
        _ => "",
    }
}

/// Backtick fence longer than any backtick run inside `content` (at least three).
fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

pub fn render(records: &[FileRecord], stats: &StatsSnapshot, out: &mut dyn Write) -> io::Result<()> {
    let mut w = BufWriter::new(out);

    writeln!(w, "# {} Output\n", PackagePaths::get().title())?;
    writeln!(w, "**Generated**: {}  ", generated_local())?;
    writeln!(
        w,
        "**Files**: {} | **Directories**: {} | **Total Size**: {}  \n",
        stats.files_processed,
        stats.directories,
        format_bytes(stats.total_bytes)
    )?;

    for (i, record) in records.iter().enumerate() {
        let content = record.content_str();
        let fence = fence_for(&content);
        let lang = dotted_extension(&record.relative_path)
            .map(|e| language_from_extension(&e[1..].to_ascii_lowercase()))
            .unwrap_or("");

        writeln!(w, "## File {}: `{}`\n", i + 1, record.display_path())?;
        writeln!(w, "**Size**: {}  ", format_bytes(record.size_bytes))?;
        writeln!(w, "**Modified**: {}  \n", format_modified(record.modified_at))?;
        writeln!(w, "### Content\n{fence}{lang}")?;
        w.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writeln!(w)?;
        }
        writeln!(w, "{fence}\n\n---\n")?;
    }

    writeln!(w, "## Summary\n")?;
    writeln!(w, "- **Files processed**: {}", stats.files_processed)?;
    writeln!(w, "- **Directories scanned**: {}", stats.directories)?;
    writeln!(w, "- **Total input size**: {}", format_bytes(stats.total_bytes))?;
    writeln!(w, "- **Processing time**: {:.2} seconds", stats.duration_secs)?;
    w.flush()
}
