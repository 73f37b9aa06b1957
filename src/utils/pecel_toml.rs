//! Load run settings from a config file (CLI only). `.pecel.toml` in the current directory is
//! picked up implicitly; `--config FILE` names one explicitly (`.json` files are read as JSON).
//! JSON files may also use the flat layout of the older Go tool (`input_dir`, `output_file`,
//! `output_format`, ...) with no `settings` object. Lib callers build [`Opts`] directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::error::PecelError;
use crate::output::OutputFormat;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PecelToml {
    #[serde(default)]
    pub settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsSection {
    #[serde(alias = "input_dir")]
    pub input: Option<PathBuf>,
    #[serde(alias = "output_file")]
    pub output: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub exclude_hidden: Option<bool>,
    #[serde(alias = "max_file_size")]
    pub max_size: Option<u64>,
    #[serde(alias = "min_file_size")]
    pub min_size: Option<u64>,
    #[serde(alias = "exclude_pattern")]
    pub exclude: Option<String>,
    #[serde(alias = "include_pattern")]
    pub include: Option<String>,
    #[serde(alias = "output_format")]
    pub format: Option<String>,
    pub compress: Option<bool>,
    pub parallel: Option<usize>,
    pub follow_links: Option<bool>,
    pub dry_run: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
}

fn parse_config(path: &Path, text: &str) -> Result<PecelToml, String> {
    let is_json = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        let value: serde_json::Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        let nested = value.as_object().is_some_and(|o| o.contains_key("settings"));
        if nested {
            serde_json::from_value(value).map_err(|e| e.to_string())
        } else {
            let settings = serde_json::from_value(value).map_err(|e| e.to_string())?;
            Ok(PecelToml { settings })
        }
    } else {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

/// Load an explicitly requested config file. Missing or malformed files are fatal.
pub fn load_config_file(path: &Path) -> Result<PecelToml, PecelError> {
    let text = std::fs::read_to_string(path).map_err(|e| PecelError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(path, &text).map_err(|reason| PecelError::Config {
        path: path.to_path_buf(),
        reason,
    })
}

/// Load `.pecel.toml` from `dir` if present. `Ok(None)` when missing; a malformed file is an
/// error the caller may choose to report and ignore.
pub fn load_pecel_toml(dir: &Path) -> Result<Option<PecelToml>, PecelError> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_config(&path, &s)
        .map(Some)
        .map_err(|reason| PecelError::Config { path, reason })
}

/// Empty strings in a config file mean "not set".
fn non_empty_path(p: &Option<PathBuf>) -> Option<PathBuf> {
    p.clone().filter(|p| !p.as_os_str().is_empty())
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $sec.$sec_field.clone() {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &PecelToml, opts: &mut Opts) -> Result<(), PecelError> {
    let s = &file.settings;
    if let Some(p) = non_empty_path(&s.input) {
        opts.input = p;
    }
    if let Some(p) = non_empty_path(&s.output) {
        opts.output = p;
    }
    apply_file_opt!(s, opts, extensions => filter.extensions);
    apply_file_opt!(s, opts, exclude_hidden => filter.exclude_hidden);
    apply_file_opt!(s, opts, max_size => filter.max_size);
    apply_file_opt!(s, opts, min_size => filter.min_size);
    if let Some(ref p) = s.exclude {
        opts.filter.exclude_pattern = Some(p.clone());
    }
    if let Some(ref p) = s.include {
        opts.filter.include_pattern = Some(p.clone());
    }
    if let Some(f) = s.format.as_deref().filter(|f| !f.is_empty()) {
        opts.format = f.parse::<OutputFormat>()?;
    }
    apply_file_opt!(s, opts, compress => compress);
    apply_file_opt!(s, opts, parallel => workers);
    apply_file_opt!(s, opts, follow_links => follow_links);
    apply_file_opt!(s, opts, dry_run => dry_run);
    apply_file_opt!(s, opts, verbose => verbose);
    Ok(())
}
