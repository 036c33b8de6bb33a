use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Recursively copy the contents of `src` into `dst`.
///
/// `dst` is created if needed. Existing files under `dst` with the same
/// relative path are overwritten; other entries are left alone. Returns the
/// number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create directory: {}", dst.display()))?;

    let mut copied = 0usize;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Failed to process path: {}", entry.path().display()))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy '{}' -> '{}'",
                    entry.path().display(),
                    target.display()
                )
            })?;
            tracing::debug!(from = %entry.path().display(), to = %target.display(), "copied file");
            copied += 1;
        }
    }

    Ok(copied)
}

/// Remove everything inside `dir` but keep `dir` itself.
///
/// Returns the number of top-level entries removed.
pub fn clear_dir_contents(dir: &Path) -> Result<usize> {
    let mut removed = 0usize;
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;

        if file_type.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
        } else {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {}", path.display()))?;
        }
        tracing::debug!(path = %path.display(), "removed entry");
        removed += 1;
    }

    Ok(removed)
}

/// Copy a single file, replacing any existing destination file
pub fn copy_file_overwrite(src: &Path, dst: &Path) -> Result<u64> {
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy '{}' -> '{}'", src.display(), dst.display()))
}

/// Recursively delete a directory if it exists
pub fn remove_dir_if_exists(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(dir)
        .with_context(|| format!("Failed to remove directory: {}", dir.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_copy_dir_recursive_preserves_structure() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        write(&src.join("a.txt"), "alpha");
        write(&src.join("nested/deeper/b.bin"), "beta");
        fs::create_dir_all(src.join("empty")).unwrap();

        let copied = copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(dst.join("nested/deeper/b.bin")).unwrap(), "beta");
        assert!(dst.join("empty").is_dir());
    }

    #[test]
    fn test_copy_dir_recursive_overwrites_same_name() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        write(&src.join("a.txt"), "new");
        write(&dst.join("a.txt"), "old");
        write(&dst.join("keep.txt"), "keep");

        copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "new");
        assert!(dst.join("keep.txt").exists());
    }

    #[test]
    fn test_copy_dir_recursive_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = copy_dir_recursive(&temp_dir.path().join("missing"), &temp_dir.path().join("dst"));
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_dir_contents_keeps_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("mods");
        write(&dir.join("one.jar"), "1");
        write(&dir.join("sub/two.jar"), "2");

        let removed = clear_dir_contents(&dir).unwrap();

        assert_eq!(removed, 2);
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_copy_file_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("options.txt");
        let dst = temp_dir.path().join("target.txt");
        write(&src, "fov:90");
        write(&dst, "fov:70\nrenderDistance:12");

        copy_file_overwrite(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"fov:90");
    }

    #[test]
    fn test_remove_dir_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("stale");
        write(&dir.join("x"), "x");

        assert!(remove_dir_if_exists(&dir).unwrap());
        assert!(!dir.exists());
        assert!(!remove_dir_if_exists(&dir).unwrap());
    }
}
