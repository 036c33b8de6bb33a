use std::fs;
use std::path::{Path, PathBuf};

use crate::filesystem::archive::ArchiveExtractor;
use crate::filesystem::backup::{BackupService, FolderBackup};
use crate::filesystem::copy::{clear_dir_contents, copy_dir_recursive, copy_file_overwrite};
use crate::filesystem::paths::{PathProvider, PathUtils, MINECRAFT_DIR};
use crate::models::{InstallError, InstallSummary, LogSink, RunContext, RunLog, FOLDER_SET, OPTIONS_FILE};
use crate::ui::picker::{FilePicker, PICKER_TITLE};

/// Name of the wrapper folder many archives put the payload under
pub const NESTED_PAYLOAD_DIR: &str = "minecraft";

/// Exit status of a successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Per-run parameters supplied by the caller
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Subfolder of the archive holding the instance
    pub instance_name: Option<String>,

    /// `yyyyMMdd_HHmmss` stamp for the backup and temp directories
    pub timestamp: String,
}

impl InstallOptions {
    pub fn new(instance_name: Option<String>, timestamp: String) -> Self {
        let instance_name = instance_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Self { instance_name, timestamp }
    }
}

/// Runs the backup-then-install sequence.
///
/// Phases run in order and the first error aborts the rest. Nothing is rolled
/// back: a partial backup or install is left in place.
pub struct InstallOrchestrator<'a> {
    paths: &'a dyn PathProvider,
    picker: &'a dyn FilePicker,
    extractor: &'a dyn ArchiveExtractor,
}

impl<'a> InstallOrchestrator<'a> {
    pub fn new(
        paths: &'a dyn PathProvider,
        picker: &'a dyn FilePicker,
        extractor: &'a dyn ArchiveExtractor,
    ) -> Self {
        Self { paths, picker, extractor }
    }

    /// Run every phase, flush the log to `sink` once, and return the exit status
    pub fn execute(&self, options: &InstallOptions, sink: &mut dyn LogSink) -> i32 {
        let mut log = RunLog::new();
        let code = match self.run(options, &mut log) {
            Ok(summary) => {
                log.info(format!("Summary: {}", summary));
                log.info("Install completed successfully");
                EXIT_SUCCESS
            }
            Err(err) => {
                log.error(format!("{}: {}", err.kind(), err));
                err.exit_code()
            }
        };

        if let Err(err) = log.flush(sink) {
            tracing::error!("Failed to present run log: {:#}", err);
            return 1;
        }
        code
    }

    /// Run every phase, appending to `log`
    pub fn run(&self, options: &InstallOptions, log: &mut RunLog) -> Result<InstallSummary, InstallError> {
        let picked = self.select_archive(log)?;
        let archive_path = self.resolve_archive(&picked, log)?;
        let target_root = self.discover_target(log)?;

        let ctx = RunContext::new(
            target_root,
            &self.paths.temp_dir(),
            options.timestamp.clone(),
            options.instance_name.clone(),
            archive_path,
        );
        let mut summary = InstallSummary {
            backup_dir: ctx.backup_dir.clone(),
            ..Default::default()
        };

        self.backup(&ctx, log, &mut summary)?;
        self.extract(&ctx, log)?;
        let source_root = self.resolve_source_root(&ctx, log)?;
        self.install_folders(&ctx, &source_root, log, &mut summary)?;
        self.install_options(&ctx, &source_root, log, &mut summary)?;
        self.cleanup(&ctx, log)?;

        Ok(summary)
    }

    fn select_archive(&self, log: &mut RunLog) -> Result<PathBuf, InstallError> {
        let picked = self
            .picker
            .pick_archive(PICKER_TITLE)
            .ok_or(InstallError::NoArchiveSelected { reason: None })?;

        if !PathUtils::has_zip_extension(&picked) {
            return Err(InstallError::NoArchiveSelected {
                reason: Some(format!("'{}' is not a .zip file", picked.display())),
            });
        }

        log.info(format!("Selected archive: {}", picked.display()));
        Ok(picked)
    }

    fn resolve_archive(&self, picked: &Path, log: &mut RunLog) -> Result<PathBuf, InstallError> {
        let resolved = fs::canonicalize(picked).map_err(|source| InstallError::ArchiveNotAccessible {
            path: picked.to_path_buf(),
            source,
        })?;
        log.info(format!("Resolved archive path: {}", resolved.display()));
        Ok(resolved)
    }

    fn discover_target(&self, log: &mut RunLog) -> Result<PathBuf, InstallError> {
        let target_root = match self.paths.target_root() {
            Ok(path) => path,
            Err(err) => {
                return Err(InstallError::TargetNotFound {
                    path: PathBuf::from(MINECRAFT_DIR),
                    reason: Some(format!("{:#}", err)),
                });
            }
        };

        if !PathUtils::is_existing_dir(&target_root) {
            return Err(InstallError::TargetNotFound { path: target_root, reason: None });
        }

        log.info(format!("Target directory: {}", target_root.display()));
        Ok(target_root)
    }

    fn backup(&self, ctx: &RunContext, log: &mut RunLog, summary: &mut InstallSummary) -> Result<(), InstallError> {
        let service = BackupService::new(&ctx.target_root, &ctx.backup_dir);
        service
            .create_backup_dir()
            .map_err(|source| InstallError::BackupDirCreateFailed {
                path: ctx.backup_dir.clone(),
                source,
            })?;
        log.info(format!("Created backup directory: {}", service.backup_dir().display()));

        for name in FOLDER_SET {
            match service.backup_folder(name) {
                Ok(FolderBackup::Copied { files }) => {
                    log.info(format!("Backed up {} ({} files)", name, files));
                    summary.backed_up.push(name.to_string());
                    summary.files_backed_up += files;
                }
                Ok(FolderBackup::CopiedFile) => {
                    log.warn(format!("{} in target is a file, not a folder; backed it up as a file", name));
                    summary.backed_up.push(name.to_string());
                    summary.files_backed_up += 1;
                }
                Ok(FolderBackup::Missing) => {
                    log.warn(format!("Folder {} not found in target, nothing to back up", name));
                }
                Err(source) => {
                    return Err(InstallError::BackupCopyFailed {
                        folder: name.to_string(),
                        source,
                    });
                }
            }
        }

        Ok(())
    }

    fn extract(&self, ctx: &RunContext, log: &mut RunLog) -> Result<(), InstallError> {
        let dir = &ctx.temp_extract_dir;

        let stale = self.extractor.discard(dir).map_err(|source| InstallError::TempCleanupFailed {
            path: dir.clone(),
            source,
        })?;
        if stale {
            log.info(format!("Removed stale extraction directory: {}", dir.display()));
        }

        fs::create_dir_all(dir).map_err(|err| InstallError::TempDirCreateFailed {
            path: dir.clone(),
            source: anyhow::Error::new(err),
        })?;

        log.info(format!("Extracting {} to {}", ctx.archive_path.display(), dir.display()));
        let stats = self
            .extractor
            .extract(&ctx.archive_path, dir)
            .map_err(|source| InstallError::ExtractFailed {
                archive: ctx.archive_path.clone(),
                source,
            })?;

        for name in &stats.rejected {
            log.warn(format!("Skipped archive entry outside extraction directory: {}", name));
        }
        log.info(format!("Extracted {} files", stats.files));
        Ok(())
    }

    fn resolve_source_root(&self, ctx: &RunContext, log: &mut RunLog) -> Result<PathBuf, InstallError> {
        let source_root = match &ctx.instance_name {
            Some(name) => ctx.temp_extract_dir.join(name),
            None => ctx.temp_extract_dir.clone(),
        };

        if !PathUtils::is_existing_dir(&source_root) {
            return Err(InstallError::InstanceFolderNotFound { path: source_root });
        }

        let nested = source_root.join(NESTED_PAYLOAD_DIR);
        if PathUtils::is_existing_dir(&nested) {
            log.info(format!("Using nested {} folder as source", NESTED_PAYLOAD_DIR));
            return Ok(nested);
        }

        log.info(format!("Source directory: {}", source_root.display()));
        Ok(source_root)
    }

    fn install_folders(
        &self,
        ctx: &RunContext,
        source_root: &Path,
        log: &mut RunLog,
        summary: &mut InstallSummary,
    ) -> Result<(), InstallError> {
        for name in FOLDER_SET {
            let src = source_root.join(name);
            if !src.exists() {
                log.warn(format!("Folder {} not found in archive, skipping", name));
                summary.skipped.push(name.to_string());
                continue;
            }
            if !src.is_dir() {
                log.warn(format!("{} in archive is not a folder, skipping", name));
                summary.skipped.push(name.to_string());
                continue;
            }

            let dest = ctx.target_root.join(name);
            if dest.exists() {
                clear_dir_contents(&dest).map_err(|source| InstallError::DestClearFailed {
                    path: dest.clone(),
                    source,
                })?;
            } else {
                fs::create_dir(&dest).map_err(|err| InstallError::DestCreateFailed {
                    path: dest.clone(),
                    source: anyhow::Error::new(err),
                })?;
            }

            let files = copy_dir_recursive(&src, &dest).map_err(|source| InstallError::InstallCopyFailed {
                folder: name.to_string(),
                source,
            })?;
            log.info(format!("Installed {} ({} files)", name, files));
            summary.installed.push(name.to_string());
            summary.files_installed += files;
        }

        Ok(())
    }

    fn install_options(
        &self,
        ctx: &RunContext,
        source_root: &Path,
        log: &mut RunLog,
        summary: &mut InstallSummary,
    ) -> Result<(), InstallError> {
        let src = source_root.join(OPTIONS_FILE);
        if !src.is_file() {
            log.warn(format!("{} not found in archive, keeping existing settings", OPTIONS_FILE));
            return Ok(());
        }

        copy_file_overwrite(&src, &ctx.target_root.join(OPTIONS_FILE))
            .map_err(|source| InstallError::OptionsCopyFailed { source })?;
        log.info(format!("Copied {}", OPTIONS_FILE));
        summary.options_copied = true;
        Ok(())
    }

    fn cleanup(&self, ctx: &RunContext, log: &mut RunLog) -> Result<(), InstallError> {
        if let Err(source) = self.extractor.discard(&ctx.temp_extract_dir) {
            log.warn("All folders were installed; only removing the temporary files failed");
            return Err(InstallError::TempCleanupFailed {
                path: ctx.temp_extract_dir.clone(),
                source,
            });
        }
        log.info(format!("Removed temporary directory {}", ctx.temp_extract_dir.display()));
        Ok(())
    }
}
