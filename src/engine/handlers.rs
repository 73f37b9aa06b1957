//! CLI command handler: merge settings, run the pipeline, print the summary.

use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::engine::arg_parser::Cli;
use crate::engine::summary::print_summary;
use crate::run::combine_dir;
use crate::utils::config::{GZIP_SUFFIX, VERSION};
use crate::utils::pecel_toml::PecelToml;
use crate::utils::{apply_file_to_opts, load_config_file, load_pecel_toml, setup_logging};
use crate::{Opts, RunSummary};

/// Settings that only affect console output.
struct Console {
    quiet: bool,
    verbose: bool,
    /// Problem with the implicit config file, reported once logging is up.
    config_warning: Option<String>,
}

/// Overwrite opts field from CLI when the flag was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $cli_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $cli.$cli_field.clone() {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Add `.gz` unless the name already ends with it.
pub fn gz_output_path(path: &Path) -> PathBuf {
    let ends_with_gz = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(GZIP_SUFFIX));
    if ends_with_gz {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(GZIP_SUFFIX);
    PathBuf::from(name)
}

/// Config from `--config` (errors are fatal) or the implicit file in `cwd` (errors are returned
/// as a warning and the file is ignored).
fn load_file_settings(cli: &Cli, cwd: Option<&Path>) -> Result<(Option<PecelToml>, Option<String>)> {
    if let Some(path) = &cli.config {
        return Ok((Some(load_config_file(path)?), None));
    }
    match cwd.map(load_pecel_toml) {
        Some(Ok(file)) => Ok((file, None)),
        Some(Err(e)) => Ok((None, Some(format!("ignoring config file: {e}")))),
        None => Ok((None, None)),
    }
}

/// Defaults, then config file, then CLI flags.
fn setup_opts(cli: &Cli, cwd: Option<&Path>) -> Result<(Opts, Console)> {
    let mut opts = Opts::default();
    let (file, config_warning) = load_file_settings(cli, cwd)?;
    let mut console = Console {
        quiet: false,
        verbose: false,
        config_warning,
    };
    if let Some(file) = &file {
        apply_file_to_opts(file, &mut opts)?;
        console.quiet = file.settings.quiet.unwrap_or(false);
        console.verbose = file.settings.verbose.unwrap_or(false);
    }

    apply_cli_opt!(cli, opts, input => input);
    apply_cli_opt!(cli, opts, output => output);
    if !cli.extensions.is_empty() {
        opts.filter.extensions = cli.extensions.clone();
    }
    apply_cli_opt!(cli, opts, exclude_hidden => filter.exclude_hidden);
    apply_cli_opt!(cli, opts, max_size => filter.max_size);
    apply_cli_opt!(cli, opts, min_size => filter.min_size);
    if cli.exclude.is_some() {
        opts.filter.exclude_pattern = cli.exclude.clone();
    }
    if cli.include.is_some() {
        opts.filter.include_pattern = cli.include.clone();
    }
    apply_cli_opt!(cli, opts, format => format);
    apply_cli_opt!(cli, opts, compress => compress);
    apply_cli_opt!(cli, opts, parallel => workers);
    apply_cli_opt!(cli, opts, follow_links => follow_links);
    apply_cli_opt!(cli, opts, dry_run => dry_run);
    if let Some(q) = cli.quiet {
        console.quiet = q;
    }
    if let Some(v) = cli.verbose {
        console.verbose = v;
    }
    opts.verbose = console.verbose && !console.quiet;

    if opts.compress {
        opts.output = gz_output_path(&opts.output);
    }
    Ok((opts, console))
}

fn print_outcome(summary: &RunSummary, opts: &Opts, console: &Console) {
    if !console.quiet {
        print_summary(
            &summary.stats,
            opts.format,
            opts.compress,
            summary.output_path.is_some(),
        );
    }
    if opts.dry_run {
        println!(
            "\n{} Dry run completed. {} files would be processed.",
            "✓".green(),
            summary.stats.files_processed
        );
    } else if !console.quiet {
        println!("\n{} Processing completed successfully!", "✓".green());
    }
}

/// Run one combine. Fails only on fatal errors; per-file failures are reported and counted.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().ok();
    let (opts, console) = setup_opts(cli, cwd.as_deref())?;
    setup_logging(console.verbose, console.quiet);
    if let Some(msg) = &console.config_warning {
        warn!("{msg}");
    }
    debug!("{} CONFIG: {:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), VERSION);
    info!("Input directory: {}", opts.input.display());
    if opts.dry_run {
        warn!("DRY RUN MODE - No files will be written");
    } else {
        info!("Output file: {}", opts.output.display());
    }

    let summary = combine_dir(&opts).context("combine failed")?;
    if summary.all_ingestion_failed() {
        warn!(
            "none of the {} matching files could be read",
            summary.candidates
        );
    }
    print_outcome(&summary, &opts, &console);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn gz_suffix_added_once() {
        assert_eq!(
            gz_output_path(Path::new("out/combined.txt")),
            PathBuf::from("out/combined.txt.gz")
        );
        assert_eq!(
            gz_output_path(Path::new("combined.txt.gz")),
            PathBuf::from("combined.txt.gz")
        );
    }

    #[test]
    fn cli_overrides_defaults() {
        let cli = Cli::try_parse_from([
            "pecel",
            "--config",
            "/nonexistent/pecel.toml",
        ])
        .unwrap();
        assert!(setup_opts(&cli, None).is_err());

        let cli = Cli::try_parse_from([
            "pecel", "-o", "x.json", "-f", "json", "-z", "--exclude-hidden=false", "-q", "-v",
        ])
        .unwrap();
        let (opts, console) = setup_opts(&cli, None).unwrap();
        assert_eq!(opts.output, PathBuf::from("x.json.gz"));
        assert!(opts.compress);
        assert!(!opts.filter.exclude_hidden);
        assert!(console.quiet);
        assert!(!opts.verbose);
    }

    #[test]
    fn malformed_implicit_config_becomes_warning() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".pecel.toml"), "[settings]\nformat = 3\n").unwrap();
        let cli = Cli::try_parse_from(["pecel", "-f", "json"]).unwrap();

        let (opts, console) = setup_opts(&cli, Some(dir.path())).unwrap();
        assert_eq!(opts.format, crate::OutputFormat::Json);
        let warning = console.config_warning.unwrap();
        assert!(warning.contains(".pecel.toml"), "{warning}");
    }

    #[test]
    fn implicit_config_applies_below_cli() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".pecel.toml"),
            "[settings]\nformat = \"xml\"\nmax_size = 10\nverbose = true\n",
        )
        .unwrap();
        let cli = Cli::try_parse_from(["pecel", "--max-size", "20"]).unwrap();

        let (opts, console) = setup_opts(&cli, Some(dir.path())).unwrap();
        assert_eq!(opts.format, crate::OutputFormat::Xml);
        assert_eq!(opts.filter.max_size, 20);
        assert!(console.verbose);
        assert!(console.config_warning.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_files_do_not_fail_the_run() {
        use std::ffi::OsStr;
        use std::os::unix::fs::PermissionsExt;

        let input = tempfile::tempdir().unwrap();
        let locked = input.path().join("locked.txt");
        std::fs::write(&locked, b"secret").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        // root ignores permission bits
        if std::fs::read(&locked).is_ok() {
            return;
        }
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("out.txt");
        let cli = Cli::try_parse_from([
            OsStr::new("pecel"),
            input.path().as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
            OsStr::new("-q"),
        ])
        .unwrap();

        assert!(handle_run(&cli).is_ok());
        assert!(output.exists());
    }
}
