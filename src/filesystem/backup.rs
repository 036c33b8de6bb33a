use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::copy::{copy_dir_recursive, copy_file_overwrite};

/// Outcome of backing up one folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderBackup {
    /// Folder copied, with the number of files
    Copied { files: usize },
    /// A plain file carries the folder's name; copied as-is
    CopiedFile,
    /// Folder absent from the target root; nothing copied
    Missing,
}

/// Backup service for copying target folders into a timestamped sibling directory
pub struct BackupService {
    /// Directory being backed up
    source_root: PathBuf,

    /// Directory receiving the copies
    backup_dir: PathBuf,
}

impl BackupService {
    /// Create a new backup service
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source_root: P, backup_dir: Q) -> Self {
        Self {
            source_root: source_root.as_ref().to_path_buf(),
            backup_dir: backup_dir.as_ref().to_path_buf(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Create the backup directory. Fails if it already exists.
    pub fn create_backup_dir(&self) -> Result<()> {
        fs::create_dir(&self.backup_dir)
            .with_context(|| format!("Failed to create backup directory: {}", self.backup_dir.display()))
    }

    /// Copy `<source root>/<name>` to `<backup dir>/<name>` if it exists
    pub fn backup_folder(&self, name: &str) -> Result<FolderBackup> {
        let src = self.source_root.join(name);
        let dst = self.backup_dir.join(name);

        if !src.exists() {
            return Ok(FolderBackup::Missing);
        }
        if !src.is_dir() {
            copy_file_overwrite(&src, &dst)
                .with_context(|| format!("Failed to back up {}", src.display()))?;
            return Ok(FolderBackup::CopiedFile);
        }

        let files = copy_dir_recursive(&src, &dst)
            .with_context(|| format!("Failed to back up {}", src.display()))?;
        tracing::debug!(folder = name, files, "backed up folder");

        Ok(FolderBackup::Copied { files })
    }
}
