pub mod archive;
pub mod backup;
pub mod copy;
pub mod paths;

pub use archive::{ArchiveError, ArchiveExtractor, ExtractStats, ZipExtractor};
pub use backup::{BackupService, FolderBackup};
pub use copy::{clear_dir_contents, copy_dir_recursive, copy_file_overwrite, remove_dir_if_exists};
pub use paths::{FixedPaths, PathProvider, PathUtils, SystemPaths};
