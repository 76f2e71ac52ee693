//! Exclusion rules for template copying.
//!
//! Entries are matched by their own name, never by their full path, so the
//! same rules apply to top-level entries and to anything nested below them:
//! - literal names (`.git`, `TODO.md`)
//! - glob patterns (`*.pyc`)
//! - patterns with a trailing slash (`.git/`), which only match directories

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;
use std::path::Path;

/// Names and patterns that are never copied out of the template.
///
/// `.git` and `.git/` overlap; both are kept so edge-case names behave the
/// same as they always have.
pub const DEFAULT_EXCLUDE: &[&str] = &[
    ".git",
    ".git/",
    "__pycache__",
    "*.pyc",
    ".DS_Store",
    "init_project.py",
    "TODO.md",
];

/// Compiled exclusion set.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    /// Patterns as given, in order
    patterns: Vec<String>,
    /// Patterns matching files and directories alike
    any_kind: GlobSet,
    /// Trailing-slash patterns, matched against directories only
    dirs_only: GlobSet,
}

impl ExclusionSet {
    /// Compiles an exclusion set from literal names and glob patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut any_kind = GlobSetBuilder::new();
        let mut dirs_only = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for pattern in patterns {
            let pattern = pattern.into();
            let (body, dir_only) = match pattern.strip_suffix('/') {
                Some(body) => (body, true),
                None => (pattern.as_str(), false),
            };
            if body.is_empty() {
                return Err(Error::invalid_pattern(&pattern, "pattern is empty"));
            }

            let glob = Glob::new(body).map_err(|e| Error::invalid_pattern(&pattern, e))?;
            if dir_only {
                dirs_only.add(glob);
            } else {
                any_kind.add(glob);
            }
            kept.push(pattern);
        }

        let any_kind = any_kind
            .build()
            .map_err(|e| Error::invalid_pattern(kept.join(", "), e))?;
        let dirs_only = dirs_only
            .build()
            .map_err(|e| Error::invalid_pattern(kept.join(", "), e))?;

        Ok(Self {
            patterns: kept,
            any_kind,
            dirs_only,
        })
    }

    /// The built-in exclusion set.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_EXCLUDE.iter().copied())
    }

    /// Patterns in the order they were given.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Checks whether an entry with this name must be skipped.
    pub fn is_excluded(&self, name: &OsStr, is_dir: bool) -> bool {
        if self.patterns.iter().any(|p| OsStr::new(p) == name) {
            return true;
        }

        let name = Path::new(name);
        self.any_kind.is_match(name) || (is_dir && self.dirs_only.is_match(name))
    }
}
