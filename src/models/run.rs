use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::filesystem::paths::{backup_dir_for, temp_extract_dir_for};

/// Folders backed up from, and installed into, the target root.
///
/// The same list drives both loops, in this order.
pub const FOLDER_SET: [&str; 8] = [
    "mods",
    "config",
    "resourcepacks",
    "shaderpacks",
    "saves",
    "versions",
    "jarmods",
    "nativelibraries",
];

/// Name of the single configuration file installed next to the folders
pub const OPTIONS_FILE: &str = "options.txt";

/// Paths and parameters of one install run, fixed once resolved
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The .minecraft directory being backed up and mutated
    pub target_root: PathBuf,

    /// `yyyyMMdd_HHmmss` stamp shared by the backup and temp directories
    pub timestamp: String,

    /// `<target root>_backup_<timestamp>`
    pub backup_dir: PathBuf,

    /// `<temp>/PrismExtract_<timestamp>`
    pub temp_extract_dir: PathBuf,

    /// Subfolder of the archive holding the instance, if any
    pub instance_name: Option<String>,

    /// Canonical path of the selected archive
    pub archive_path: PathBuf,
}

impl RunContext {
    pub fn new(
        target_root: PathBuf,
        temp_root: &Path,
        timestamp: String,
        instance_name: Option<String>,
        archive_path: PathBuf,
    ) -> Self {
        let backup_dir = backup_dir_for(&target_root, &timestamp);
        let temp_extract_dir = temp_extract_dir_for(temp_root, &timestamp);
        Self {
            target_root,
            timestamp,
            backup_dir,
            temp_extract_dir,
            instance_name,
            archive_path,
        }
    }
}

/// What a completed run did
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallSummary {
    pub backup_dir: PathBuf,
    pub backed_up: Vec<String>,
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
    pub options_copied: bool,
    pub files_backed_up: usize,
    pub files_installed: usize,
}

impl std::fmt::Display for InstallSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} folder(s) backed up ({} files), {} installed ({} files), {} skipped, options.txt {}",
            self.backed_up.len(),
            self.files_backed_up,
            self.installed.len(),
            self.files_installed,
            self.skipped.len(),
            if self.options_copied { "copied" } else { "not copied" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_context_derives_paths() {
        let ctx = RunContext::new(
            PathBuf::from("/home/steve/.minecraft"),
            Path::new("/tmp"),
            "20240131_235959".to_string(),
            Some("Pack".to_string()),
            PathBuf::from("/downloads/pack.zip"),
        );

        assert_eq!(ctx.backup_dir, PathBuf::from("/home/steve/.minecraft_backup_20240131_235959"));
        assert_eq!(ctx.temp_extract_dir, PathBuf::from("/tmp/PrismExtract_20240131_235959"));
        assert_eq!(ctx.instance_name.as_deref(), Some("Pack"));
    }

    #[test]
    fn test_folder_set_is_unique() {
        let mut names = FOLDER_SET.to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), FOLDER_SET.len());
    }

    #[test]
    fn test_summary_display() {
        let summary = InstallSummary {
            backed_up: vec!["mods".into(), "saves".into()],
            installed: vec!["mods".into()],
            skipped: vec!["config".into()],
            options_copied: true,
            files_backed_up: 3,
            files_installed: 2,
            ..Default::default()
        };
        assert_eq!(
            summary.to_string(),
            "2 folder(s) backed up (3 files), 1 installed (2 files), 1 skipped, options.txt copied"
        );
    }
}
