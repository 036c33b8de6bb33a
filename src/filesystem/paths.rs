use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

/// Name of the game data directory under the application-data root
pub const MINECRAFT_DIR: &str = ".minecraft";

/// Prefix of the temporary extraction directory
pub const EXTRACT_DIR_PREFIX: &str = "PrismExtract_";

/// Timestamp layout used for backup and temp directory names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Source of the environment-dependent roots an install run needs
pub trait PathProvider {
    /// Platform application-data directory (`%APPDATA%` on Windows)
    fn app_data_dir(&self) -> Result<PathBuf>;

    /// Directory under which the archive is extracted
    fn temp_dir(&self) -> PathBuf;

    /// The .minecraft directory inside the application-data root
    fn target_root(&self) -> Result<PathBuf> {
        Ok(self.app_data_dir()?.join(MINECRAFT_DIR))
    }
}

/// Path provider backed by the running platform
#[derive(Debug, Default, Clone)]
pub struct SystemPaths;

impl PathProvider for SystemPaths {
    fn app_data_dir(&self) -> Result<PathBuf> {
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find application data directory"))
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

/// Path provider with explicit roots (useful for testing)
#[derive(Debug, Clone)]
pub struct FixedPaths {
    pub app_data: PathBuf,
    pub temp: PathBuf,
}

impl FixedPaths {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(app_data: P, temp: Q) -> Self {
        Self {
            app_data: app_data.as_ref().to_path_buf(),
            temp: temp.as_ref().to_path_buf(),
        }
    }
}

impl PathProvider for FixedPaths {
    fn app_data_dir(&self) -> Result<PathBuf> {
        Ok(self.app_data.clone())
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp.clone()
    }
}

/// Current local time formatted for directory names
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// `<target root>_backup_<timestamp>`, a sibling of the target root
pub fn backup_dir_for(target_root: &Path, timestamp: &str) -> PathBuf {
    let mut name: OsString = target_root.as_os_str().to_os_string();
    name.push(format!("_backup_{}", timestamp));
    PathBuf::from(name)
}

/// `<temp root>/PrismExtract_<timestamp>`
pub fn temp_extract_dir_for(temp_root: &Path, timestamp: &str) -> PathBuf {
    temp_root.join(format!("{}{}", EXTRACT_DIR_PREFIX, timestamp))
}

/// Path helper functions
pub struct PathUtils;

impl PathUtils {
    /// Whether the path has a `.zip` extension, ignoring case
    pub fn has_zip_extension<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("zip"))
    }

    /// Whether the path exists and is a directory
    pub fn is_existing_dir<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    #[test]
    fn test_target_root_appends_minecraft() {
        let paths = FixedPaths::new("/users/alex/AppData/Roaming", "/tmp");
        assert_eq!(
            paths.target_root().unwrap(),
            PathBuf::from("/users/alex/AppData/Roaming/.minecraft")
        );
    }

    #[test]
    fn test_backup_dir_is_sibling() {
        let dir = backup_dir_for(Path::new("/data/.minecraft"), "20240101_120000");
        assert_eq!(dir, PathBuf::from("/data/.minecraft_backup_20240101_120000"));
        assert_eq!(dir.parent(), Some(Path::new("/data")));
    }

    #[test]
    fn test_temp_extract_dir() {
        let dir = temp_extract_dir_for(Path::new("/tmp"), "20240101_120000");
        assert_eq!(dir, PathBuf::from("/tmp/PrismExtract_20240101_120000"));
    }

    #[test]
    fn test_timestamp_format_is_parseable() {
        let stamp = timestamp_now();
        assert_eq!(stamp.len(), 15);
        assert!(NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_has_zip_extension() {
        assert!(PathUtils::has_zip_extension("pack.zip"));
        assert!(PathUtils::has_zip_extension("PACK.ZIP"));
        assert!(!PathUtils::has_zip_extension("pack.rar"));
        assert!(!PathUtils::has_zip_extension("zip"));
    }

    #[test]
    fn test_is_existing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(PathUtils::is_existing_dir(temp_dir.path()));
        assert!(!PathUtils::is_existing_dir(&file));
        assert!(!PathUtils::is_existing_dir(temp_dir.path().join("missing")));
    }
}
