//! Filtered recursive copying.
//!
//! Files are copied with their permissions and access/modification times.
//! Directories get their permissions and times applied after everything
//! inside them has been written. Symlinks are followed and their targets
//! copied as regular content.

use crate::error::{Error, Result};
use crate::filters::ExclusionSet;
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of a copied top-level entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Counts from one tree copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub directories: usize,
}

/// Copies template entries while honouring an exclusion set.
#[derive(Debug, Clone, Copy)]
pub struct TemplateCopier<'a> {
    exclusions: &'a ExclusionSet,
}

impl<'a> TemplateCopier<'a> {
    pub fn new(exclusions: &'a ExclusionSet) -> Self {
        Self { exclusions }
    }

    /// Copies the directory `from` to `to`, skipping excluded entries at
    /// every depth. `from` itself is not checked against the exclusions.
    pub fn copy_tree(&self, from: &Path, to: &Path) -> Result<CopyStats> {
        let mut stats = CopyStats::default();
        fs::create_dir_all(to).map_err(|e| Error::copy(from, to, e))?;

        // Pre-order walk; metadata for these is applied in reverse afterwards
        let mut dirs: Vec<(PathBuf, PathBuf)> = vec![(from.to_path_buf(), to.to_path_buf())];

        let walker = WalkDir::new(from)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                let skip = self
                    .exclusions
                    .is_excluded(e.file_name(), e.file_type().is_dir());
                if skip {
                    tracing::debug!("Skipping {}", e.path().display());
                }
                !skip
            });

        for entry in walker {
            let entry = entry?;
            let rel_path = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| Error::copy(entry.path(), to, io::Error::other(e)))?;
            let dest = to.join(rel_path);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest).map_err(|e| Error::copy(entry.path(), &dest, e))?;
                dirs.push((entry.path().to_path_buf(), dest));
                stats.directories += 1;
            } else {
                tracing::trace!("Copying {}", rel_path.display());
                copy_file(entry.path(), &dest)?;
                stats.files += 1;
            }
        }

        for (src, dest) in dirs.iter().rev() {
            copy_dir_metadata(src, dest)?;
        }

        Ok(stats)
    }
}

/// Copies one file's bytes, permissions and timestamps.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|e| Error::copy(from, to, e))?;
    copy_times(from, to)
}

fn copy_times(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from).map_err(|e| Error::copy(from, to, e))?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(to, atime, mtime).map_err(|e| Error::copy(from, to, e))
}

fn copy_dir_metadata(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from).map_err(|e| Error::copy(from, to, e))?;
    fs::set_permissions(to, metadata.permissions()).map_err(|e| Error::copy(from, to, e))?;
    copy_times(from, to)
}
