//! Project initialization workflow.
//!
//! A run resolves the project name, picks the target next to the template
//! directory, clears it after confirmation, copies the template minus the
//! exclusion set, writes a fresh README and patches the manifest.
//!
//! Every failure ends the run. Nothing is rolled back: a copy that fails
//! halfway leaves a partially populated target directory behind. The
//! existence check and the removal of an old target are not atomic with
//! respect to other processes touching the same path.

use crate::copy::{copy_file, EntryKind, TemplateCopier};
use crate::error::{Error, Result};
use crate::filters::ExclusionSet;
use crate::manifest::ManifestOutcome;
use crate::readme::write_readme;
use crate::settings::InitSettings;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Prompt shown when no name was passed in
pub const NAME_PROMPT: &str = "Enter new project name";

/// Line-oriented input source used for the name and overwrite prompts.
pub trait Prompt {
    /// Show `prompt` and block until one line of input is read. The line
    /// ending is not included. End of input yields an empty string.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Options for one run
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Project name; prompted for when missing or empty
    pub name: Option<String>,
    /// Replace an existing target without asking
    pub force: bool,
}

/// A top-level template entry that was copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct InitReport {
    pub project_name: String,
    pub target_dir: PathBuf,
    pub copied: Vec<CopiedEntry>,
    pub skipped: Vec<String>,
    pub readme_path: PathBuf,
    pub manifest_file: String,
    pub manifest: ManifestOutcome,
}

/// Scaffolds new projects from one template directory.
#[derive(Debug)]
pub struct ProjectInitializer {
    template_dir: PathBuf,
    settings: InitSettings,
    exclusions: ExclusionSet,
}

impl ProjectInitializer {
    /// Create an initializer for `template_dir`.
    ///
    /// The directory is canonicalized and the exclusion patterns compiled
    /// up front, so bad input fails before anything is written.
    pub fn new(template_dir: impl AsRef<Path>, settings: InitSettings) -> Result<Self> {
        let given = template_dir.as_ref();
        let template_dir =
            fs::canonicalize(given).map_err(|_| Error::template_not_found(given))?;
        if !template_dir.is_dir() {
            return Err(Error::template_not_found(given));
        }

        let exclusions = settings.exclusion_set()?;

        Ok(Self {
            template_dir,
            settings,
            exclusions,
        })
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    pub fn settings(&self) -> &InitSettings {
        &self.settings
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Sibling of the template directory named `project_name`.
    pub fn target_dir(&self, project_name: &str) -> Result<PathBuf> {
        let parent = self
            .template_dir
            .parent()
            .ok_or_else(|| Error::NoParentDirectory {
                path: self.template_dir.clone(),
            })?;

        let target = parent.join(project_name);
        if target == self.template_dir {
            return Err(Error::TargetIsTemplate { path: target });
        }
        Ok(target)
    }

    /// Run the whole workflow.
    pub fn run(&self, options: &InitOptions, prompt: &mut dyn Prompt) -> Result<InitReport> {
        let project_name = resolve_name(options.name.as_deref(), prompt)?;
        let target_dir = self.target_dir(&project_name)?;

        self.prepare_target(&target_dir, options.force, prompt)?;

        tracing::info!("Creating new project in {}", target_dir.display());
        let (copied, skipped) = self.copy_template(&target_dir)?;

        tracing::info!("Creating new README.md...");
        let readme_path =
            write_readme(&target_dir, &project_name, &self.settings.readme_description)?;

        let patch = self.settings.manifest_patch();
        let manifest = patch.patch_in(&target_dir, &project_name)?;

        Ok(InitReport {
            project_name,
            target_dir,
            copied,
            skipped,
            readme_path,
            manifest_file: patch.file().to_string(),
            manifest,
        })
    }

    /// Clear an existing target after confirmation, then create it.
    fn prepare_target(&self, target_dir: &Path, force: bool, prompt: &mut dyn Prompt) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(target_dir) {
            if !force {
                let question = format!(
                    "Directory {} already exists. Overwrite? (y/n)",
                    target_dir.display()
                );
                let answer = prompt.read_line(&question)?;
                if answer.to_lowercase() != "y" {
                    return Err(Error::overwrite_declined(target_dir));
                }
            }

            tracing::debug!("Removing existing {}", target_dir.display());
            if metadata.is_dir() {
                fs::remove_dir_all(target_dir)?;
            } else {
                fs::remove_file(target_dir)?;
            }
        }

        fs::create_dir_all(target_dir)?;
        Ok(())
    }

    /// Copy every non-excluded top-level entry, in name order.
    fn copy_template(&self, target_dir: &Path) -> Result<(Vec<CopiedEntry>, Vec<String>)> {
        let mut entries = fs::read_dir(&self.template_dir)?.collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.file_name());

        let copier = TemplateCopier::new(&self.exclusions);
        let mut copied = Vec::new();
        let mut skipped = Vec::new();

        for entry in entries {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().into_owned();
            let source = entry.path();
            let is_dir = source.is_dir();

            if self.exclusions.is_excluded(&file_name, is_dir) {
                tracing::info!("Skipping {}", name);
                skipped.push(name);
                continue;
            }

            let dest = target_dir.join(&file_name);
            let kind = if is_dir {
                tracing::info!("Copying directory {}...", name);
                let stats = copier.copy_tree(&source, &dest)?;
                tracing::debug!(
                    "Copied {} files in {} directories under {}",
                    stats.files,
                    stats.directories,
                    name
                );
                EntryKind::Directory
            } else {
                tracing::info!("Copying file {}...", name);
                copy_file(&source, &dest)?;
                EntryKind::File
            };

            copied.push(CopiedEntry { name, kind });
        }

        Ok((copied, skipped))
    }
}

/// Resolve the project name from the option or one prompt.
///
/// The name is trimmed and must be a single plain directory name.
pub fn resolve_name(name: Option<&str>, prompt: &mut dyn Prompt) -> Result<String> {
    let raw = match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => prompt.read_line(NAME_PROMPT)?,
    };

    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::EmptyProjectName);
    }

    let mut components = Path::new(name).components();
    let single_component = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();
    if !single_component || name.contains(['/', '\\']) {
        return Err(Error::invalid_project_name(name));
    }

    Ok(name.to_string())
}
