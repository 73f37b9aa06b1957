//! XML document with a `<metadata>` block and one `<file>` element per record.

use std::borrow::Cow;
use std::io::{self, BufWriter, Write};

use crate::engine::tools::{format_modified, generated_rfc3339};
use crate::utils::config::{PackagePaths, VERSION};
use crate::{FileRecord, StatsSnapshot};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape markup characters; characters XML 1.0 cannot carry become U+FFFD.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_xml_char(c))
    {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if !is_xml_char(c) => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn element(w: &mut impl Write, indent: &str, name: &str, value: &str) -> io::Result<()> {
    writeln!(w, "{indent}<{name}>{}</{name}>", escape(value))
}

pub fn render(records: &[FileRecord], stats: &StatsSnapshot, out: &mut dyn Write) -> io::Result<()> {
    let mut w = BufWriter::new(out);
    let root = format!("{}_output", PackagePaths::get().pkg_name());

    w.write_all(XML_HEADER.as_bytes())?;
    writeln!(
        w,
        "<{root} version=\"{}\" generated=\"{}\">",
        escape(VERSION),
        escape(&generated_rfc3339())
    )?;
    writeln!(w, "  <metadata>")?;
    element(&mut w, "    ", "files", &stats.files_processed.to_string())?;
    element(&mut w, "    ", "directories", &stats.directories.to_string())?;
    element(&mut w, "    ", "total_size", &stats.total_bytes.to_string())?;
    element(&mut w, "    ", "duration_seconds", &stats.duration_secs.to_string())?;
    writeln!(w, "  </metadata>")?;

    for record in records {
        writeln!(w, "  <file>")?;
        element(&mut w, "    ", "path", &record.absolute_path.to_string_lossy())?;
        element(&mut w, "    ", "size", &record.size_bytes.to_string())?;
        element(&mut w, "    ", "modified", &format_modified(record.modified_at))?;
        element(&mut w, "    ", "content", &record.content_str())?;
        element(&mut w, "    ", "relative_path", &record.display_path())?;
        writeln!(w, "  </file>")?;
    }

    writeln!(w, "</{root}>")?;
    w.flush()
}
