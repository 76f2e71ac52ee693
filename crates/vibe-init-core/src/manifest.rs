//! Project-name patching for the packaging manifest.
//!
//! The manifest is edited as plain text: every `name = "<placeholder>"`
//! occurrence is replaced with `name = "<project>"`. Nothing is parsed, so a
//! manifest formatted differently is left exactly as it was.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// What happened to the manifest during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestOutcome {
    /// No manifest in the target directory
    Missing,
    /// Manifest present but the placeholder line was not found
    Unchanged,
    /// Placeholder replaced this many times
    Patched { replacements: usize },
}

/// Literal replacement of the project name field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch {
    file: String,
    placeholder: String,
}

impl ManifestPatch {
    pub fn new(file: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Manifest path relative to the project directory
    pub fn file(&self) -> &str {
        &self.file
    }

    fn needle(&self) -> String {
        format!("name = \"{}\"", self.placeholder)
    }

    /// Rewrites `content` for `project_name`, returning the new text and
    /// how many occurrences were replaced.
    pub fn apply(&self, content: &str, project_name: &str) -> (String, usize) {
        let needle = self.needle();
        let count = content.matches(needle.as_str()).count();
        if count == 0 {
            return (content.to_string(), 0);
        }
        let replacement = format!("name = \"{}\"", project_name);
        (content.replace(needle.as_str(), &replacement), count)
    }

    /// Patches the manifest inside `project_dir`, writing it back in full.
    pub fn patch_in(&self, project_dir: &Path, project_name: &str) -> Result<ManifestOutcome> {
        tracing::info!("Updating {}...", self.file);
        let path = project_dir.join(&self.file);
        if !path.exists() {
            tracing::debug!("No {} in {}", self.file, project_dir.display());
            return Ok(ManifestOutcome::Missing);
        }

        let content = fs::read_to_string(&path)?;
        let (patched, replacements) = self.apply(&content, project_name);
        fs::write(&path, patched)?;

        if replacements == 0 {
            tracing::warn!("{} does not contain {}", self.file, self.needle());
            Ok(ManifestOutcome::Unchanged)
        } else {
            Ok(ManifestOutcome::Patched { replacements })
        }
    }
}
