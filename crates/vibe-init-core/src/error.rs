//! Error types for vibe-init-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using vibe-init-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project initialization error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project name resolved to an empty string
    #[error("Project name cannot be empty")]
    EmptyProjectName,

    /// Project name is not a single plain directory name
    #[error("Invalid project name: {name}. Must be a single directory name without path separators")]
    InvalidProjectName { name: String },

    /// User did not confirm overwriting an existing target
    #[error("Directory {} already exists and was not overwritten", path.display())]
    OverwriteDeclined { path: PathBuf },

    /// Template root missing or not a directory
    #[error("Template directory not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    /// Template root has no parent to create the project next to
    #[error("Template directory has no parent directory: {}", path.display())]
    NoParentDirectory { path: PathBuf },

    /// Target would replace the template itself
    #[error("Target directory is the template directory itself: {}", path.display())]
    TargetIsTemplate { path: PathBuf },

    /// Exclusion pattern failed to compile
    #[error("Invalid exclusion pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Settings file not found
    #[error("Settings file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Invalid settings value
    #[error("Invalid settings: {message}")]
    InvalidConfig { message: String },

    /// Copying a single entry failed
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// Directory walk error
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>) -> Self {
        Self::InvalidProjectName { name: name.into() }
    }

    /// Create an overwrite declined error
    pub fn overwrite_declined(path: impl Into<PathBuf>) -> Self {
        Self::OverwriteDeclined { path: path.into() }
    }

    /// Create a template not found error
    pub fn template_not_found(path: impl Into<PathBuf>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a copy error for a failed `from -> to` operation
    pub fn copy(from: &Path, to: &Path, source: std::io::Error) -> Self {
        Self::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
    }

    /// True when the run ended because the user said no
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::OverwriteDeclined { .. })
    }
}
