use std::path::PathBuf;

use crate::filesystem::archive::ArchiveError;

/// Classification of every fatal failure an install run can hit.
///
/// All kinds map to the same process exit code; the distinction only shows
/// up in the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoArchiveSelected,
    ArchiveNotAccessible,
    TargetNotFound,
    BackupDirCreateFailed,
    BackupCopyFailed,
    TempDirCreateFailed,
    TempCleanupFailed,
    ExtractFailed,
    InstanceFolderNotFound,
    DestClearFailed,
    DestCreateFailed,
    InstallCopyFailed,
    OptionsCopyFailed,
}

impl ErrorKind {
    /// Get the kind name as it appears in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoArchiveSelected => "NoArchiveSelected",
            ErrorKind::ArchiveNotAccessible => "ArchiveNotAccessible",
            ErrorKind::TargetNotFound => "TargetNotFound",
            ErrorKind::BackupDirCreateFailed => "BackupDirCreateFailed",
            ErrorKind::BackupCopyFailed => "BackupCopyFailed",
            ErrorKind::TempDirCreateFailed => "TempDirCreateFailed",
            ErrorKind::TempCleanupFailed => "TempCleanupFailed",
            ErrorKind::ExtractFailed => "ExtractFailed",
            ErrorKind::InstanceFolderNotFound => "InstanceFolderNotFound",
            ErrorKind::DestClearFailed => "DestClearFailed",
            ErrorKind::DestCreateFailed => "DestCreateFailed",
            ErrorKind::InstallCopyFailed => "InstallCopyFailed",
            ErrorKind::OptionsCopyFailed => "OptionsCopyFailed",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal install errors. Each variant aborts the remaining phases.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("No archive selected{}", reason_suffix(.reason))]
    NoArchiveSelected { reason: Option<String> },

    #[error("Archive '{}' is not accessible: {source}", .path.display())]
    ArchiveNotAccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Target directory '{}' not found{}", .path.display(), reason_suffix(.reason))]
    TargetNotFound { path: PathBuf, reason: Option<String> },

    #[error("Could not create backup directory '{}': {source:#}", .path.display())]
    BackupDirCreateFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Backup of '{folder}' failed: {source:#}")]
    BackupCopyFailed {
        folder: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Could not create temp directory '{}': {source:#}", .path.display())]
    TempDirCreateFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Could not remove temp directory '{}': {source:#}", .path.display())]
    TempCleanupFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Extraction of '{}' failed: {source}", .archive.display())]
    ExtractFailed {
        archive: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("Instance folder '{}' not found in archive", .path.display())]
    InstanceFolderNotFound { path: PathBuf },

    #[error("Could not clear '{}': {source:#}", .path.display())]
    DestClearFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Could not create '{}': {source:#}", .path.display())]
    DestCreateFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Install of '{folder}' failed: {source:#}")]
    InstallCopyFailed {
        folder: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Could not copy options.txt: {source:#}")]
    OptionsCopyFailed {
        #[source]
        source: anyhow::Error,
    },
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {reason}"),
        None => String::new(),
    }
}

impl InstallError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InstallError::NoArchiveSelected { .. } => ErrorKind::NoArchiveSelected,
            InstallError::ArchiveNotAccessible { .. } => ErrorKind::ArchiveNotAccessible,
            InstallError::TargetNotFound { .. } => ErrorKind::TargetNotFound,
            InstallError::BackupDirCreateFailed { .. } => ErrorKind::BackupDirCreateFailed,
            InstallError::BackupCopyFailed { .. } => ErrorKind::BackupCopyFailed,
            InstallError::TempDirCreateFailed { .. } => ErrorKind::TempDirCreateFailed,
            InstallError::TempCleanupFailed { .. } => ErrorKind::TempCleanupFailed,
            InstallError::ExtractFailed { .. } => ErrorKind::ExtractFailed,
            InstallError::InstanceFolderNotFound { .. } => ErrorKind::InstanceFolderNotFound,
            InstallError::DestClearFailed { .. } => ErrorKind::DestClearFailed,
            InstallError::DestCreateFailed { .. } => ErrorKind::DestCreateFailed,
            InstallError::InstallCopyFailed { .. } => ErrorKind::InstallCopyFailed,
            InstallError::OptionsCopyFailed { .. } => ErrorKind::OptionsCopyFailed,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}
