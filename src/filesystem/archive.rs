use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use super::copy::remove_dir_if_exists;

/// Errors raised while unpacking an instance archive
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Failed to open archive '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt or unsupported archive: {0}")]
    Zip(#[from] ZipError),

    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a successful extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub files: usize,
    pub directories: usize,
    /// Entry names rejected because they would land outside the destination
    pub rejected: Vec<String>,
}

/// Unpacks an archive into a destination directory, overwriting existing entries
pub trait ArchiveExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<ExtractStats, ArchiveError>;

    /// Remove an extraction directory and everything in it. Returns whether
    /// anything was there.
    fn discard(&self, dest: &Path) -> anyhow::Result<bool> {
        remove_dir_if_exists(dest)
    }
}

/// Extractor for `.zip` instance archives
#[derive(Debug, Default, Clone)]
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<ExtractStats, ArchiveError> {
        let file = File::open(archive).map_err(|source| ArchiveError::Open {
            path: archive.to_path_buf(),
            source,
        })?;
        let mut zip = ZipArchive::new(file)?;
        let mut stats = ExtractStats::default();

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            let Some(rel) = entry.enclosed_name().map(Path::to_path_buf) else {
                tracing::warn!(entry = entry.name(), "skipping archive entry outside destination");
                stats.rejected.push(entry.name().to_string());
                continue;
            };
            let out_path = dest.join(rel);

            if entry.is_dir() {
                fs::create_dir_all(&out_path).map_err(|source| ArchiveError::Io {
                    path: out_path.clone(),
                    source,
                })?;
                stats.directories += 1;
                continue;
            }

            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(|source| ArchiveError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            let mut out = File::create(&out_path).map_err(|source| ArchiveError::Io {
                path: out_path.clone(),
                source,
            })?;
            io::copy(&mut entry, &mut out).map_err(|source| ArchiveError::Io {
                path: out_path.clone(),
                source,
            })?;
            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;

                fs::set_permissions(&out_path, fs::Permissions::from_mode(mode & 0o777)).map_err(|source| {
                    ArchiveError::Io {
                        path: out_path.clone(),
                        source,
                    }
                })?;
            }
            tracing::debug!(path = %out_path.display(), "extracted file");
            stats.files += 1;
        }

        Ok(stats)
    }
}
