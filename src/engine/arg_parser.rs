use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Combine the files of a directory tree into one text, JSON, XML or Markdown file.
///
/// Flags override `--config FILE` (or `.pecel.toml` in the current directory), which overrides
/// built-in defaults.
#[derive(Clone, Debug, Parser)]
#[command(name = "pecel", version)]
#[command(about = "Combine files recursively into a single text, JSON, XML or Markdown file.")]
pub struct Cli {
    /// Input directory. Default: current directory.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file path. Default: combined.txt.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// File extensions to include (e.g. .go,.rs). Repeat or comma-separate; `*` for all.
    #[arg(long = "ext", short = 'e', value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Exclude hidden files and prune hidden directories. Default: true.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub exclude_hidden: Option<bool>,

    /// Maximum file size in bytes (0 = unlimited).
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub max_size: Option<u64>,

    /// Minimum file size in bytes (0 = unlimited).
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub min_size: Option<u64>,

    /// Regex matched against relative paths; matching files are skipped.
    #[arg(long)]
    pub exclude: Option<String>,

    /// Regex matched against relative paths; only matching files are kept.
    #[arg(long)]
    pub include: Option<String>,

    /// Output format: text, json, xml, markdown (md).
    #[arg(long, short = 'f', value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Compress output with gzip (appends .gz to the output name).
    #[arg(long, short = 'z', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub compress: Option<bool>,

    /// Number of files to process in parallel (1 = sequential, 0 = all available threads).
    #[arg(long, short = 'p', value_parser = clap::value_parser!(usize))]
    pub parallel: Option<usize>,

    /// Follow symbolic links.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Show what would be processed without writing output.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub dry_run: Option<bool>,

    /// Suppress non-essential output.
    #[arg(long, short = 'q', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub quiet: Option<bool>,

    /// Verbose output and progress bar.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Load settings from a TOML (or .json) file.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
