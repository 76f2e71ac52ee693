//! Generated project README.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const README_FILE_NAME: &str = "README.md";

/// README body for a new project: a heading and one sentence.
pub fn render_readme(project_name: &str, description: &str) -> String {
    format!("# {}\n\n{}", project_name, description)
}

/// Writes `README.md` into `project_dir`, replacing any copied one.
pub fn write_readme(project_dir: &Path, project_name: &str, description: &str) -> Result<PathBuf> {
    let path = project_dir.join(README_FILE_NAME);
    fs::write(&path, render_readme(project_name, description))?;
    Ok(path)
}
