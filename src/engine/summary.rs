//! End-of-run summary box. Formatting only; colors are applied per call.

use colored::Colorize;

use crate::StatsSnapshot;
use crate::engine::tools::format_bytes;
use crate::output::OutputFormat;

const BOX_WIDTH: usize = 50;

/// Build the summary lines. Written output fields are shown only when `written`.
pub fn summary_lines(
    stats: &StatsSnapshot,
    format: OutputFormat,
    compress: bool,
    written: bool,
) -> Vec<String> {
    let bar = "│".cyan();
    let mut lines = vec![
        format!("{} {}", "┌".cyan(), "─".repeat(BOX_WIDTH)),
        format!("{bar} Processing Summary"),
        format!("{} {}", "├".cyan(), "─".repeat(BOX_WIDTH)),
        format!(
            "{bar} Files processed:     {}",
            stats.files_processed.to_string().green()
        ),
        format!(
            "{bar} Directories scanned: {}",
            stats.directories.to_string().green()
        ),
        format!(
            "{bar} Total size:          {}",
            format_bytes(stats.total_bytes).green()
        ),
        format!("{bar} Processing time:     {:.2} seconds", stats.duration_secs),
    ];
    if written {
        lines.push(format!("{bar} Output format:       {}", format.name().green()));
        if compress {
            lines.push(format!("{bar} Compression:         {}", "gzip".green()));
        }
        lines.push(format!(
            "{bar} Output size:         {}",
            format_bytes(stats.output_size).green()
        ));
        if let Some(ratio) = stats.output_ratio() {
            lines.push(format!("{bar} Compression ratio:   {ratio:.1}%"));
        }
    }
    lines.push(format!("{} {}", "└".cyan(), "─".repeat(BOX_WIDTH)));
    lines
}

/// Print the summary box to stdout.
pub fn print_summary(stats: &StatsSnapshot, format: OutputFormat, compress: bool, written: bool) {
    println!();
    for line in summary_lines(stats, format, compress, written) {
        println!("{line}");
    }
}
