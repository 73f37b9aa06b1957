//! Predicate filter: decides whether a discovered file is ingested.

use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::FilterOpts;
use crate::engine::tools::{path_relative_to, path_to_display_string};
use crate::error::PecelError;

/// Immutable, compiled filter rules for one run.
#[derive(Clone, Debug)]
pub struct FilterCriteria {
    root: PathBuf,
    /// Lowercased, dot-prefixed. Empty = every extension.
    extensions: HashSet<String>,
    exclude_hidden: bool,
    max_size: u64,
    min_size: u64,
    exclude: Option<Regex>,
    include: Option<Regex>,
}

/// True for names starting with `.`, or with `~` when longer than one char.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || (name.starts_with('~') && name.len() > 1)
}

/// Extension from the last `.` of the leaf name, dot included (`a.tar.gz` → `.gz`, `.env` → `.env`).
pub fn dotted_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|i| &name[i..])
}

/// Trim and check extension entries. `*` anywhere means "all files" (empty list).
pub fn normalize_extensions(raw: &[String]) -> Result<Vec<String>, PecelError> {
    let mut out = Vec::with_capacity(raw.len());
    for ext in raw.iter().flat_map(|e| e.split(',')) {
        let ext = ext.trim();
        if ext.is_empty() {
            continue;
        }
        if ext == "*" {
            return Ok(Vec::new());
        }
        if !ext.starts_with('.') {
            return Err(PecelError::InvalidExtension(ext.to_string()));
        }
        out.push(ext.to_string());
    }
    Ok(out)
}

fn compile(which: &'static str, pattern: Option<&str>) -> Result<Option<Regex>, PecelError> {
    match pattern {
        Some(p) if !p.is_empty() => Regex::new(p)
            .map(Some)
            .map_err(|source| PecelError::InvalidPattern { which, source }),
        _ => Ok(None),
    }
}

impl FilterCriteria {
    /// Compile `opts` against `root`. Bad extensions or regexes are fatal.
    pub fn new(root: &Path, opts: &FilterOpts) -> Result<Self, PecelError> {
        let extensions = normalize_extensions(&opts.extensions)?
            .into_iter()
            .map(|e| e.to_lowercase())
            .collect();
        Ok(Self {
            root: root.to_path_buf(),
            extensions,
            exclude_hidden: opts.exclude_hidden,
            max_size: opts.max_size,
            min_size: opts.min_size,
            exclude: compile("exclude", opts.exclude_pattern.as_deref())?,
            include: compile("include", opts.include_pattern.as_deref())?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a directory's whole subtree is skipped during the walk. The root is never pruned.
    pub fn prunes_dir(&self, path: &Path) -> bool {
        self.exclude_hidden
            && path != self.root
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_hidden)
    }

    /// Decide whether a file of `size` bytes at `path` is ingested. Pure; rules run in a fixed
    /// order and stop at the first rejection.
    pub fn accept(&self, path: &Path, size: u64) -> bool {
        if self.exclude_hidden
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_hidden)
        {
            return false;
        }
        if self.max_size > 0 && size > self.max_size {
            return false;
        }
        if self.min_size > 0 && size < self.min_size {
            return false;
        }
        if !self.extensions.is_empty() {
            let matched = dotted_extension(path)
                .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()));
            if !matched {
                return false;
            }
        }
        if self.exclude.is_none() && self.include.is_none() {
            return true;
        }
        let rel = path_relative_to(path, &self.root).unwrap_or_else(|| path.to_path_buf());
        let rel = path_to_display_string(&rel);
        if let Some(re) = &self.exclude
            && re.is_match(&rel)
        {
            return false;
        }
        if let Some(re) = &self.include
            && !re.is_match(&rel)
        {
            return false;
        }
        true
    }
}
