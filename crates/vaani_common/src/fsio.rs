//! File-system helpers shared by the daemon.

use std::fs;
use std::io;
use std::path::Path;

/// Write a file atomically: write to a sibling temp file, then rename over
/// the target. Readers never observe a half-written file.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;

    // Rename to target (atomic on most filesystems)
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        atomic_write(&path, "[1]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1]");

        atomic_write(&path, "[1,2]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2]");
    }

    #[test]
    fn creates_missing_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/state.json");

        atomic_write(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        atomic_write(&path, "x").unwrap();
        assert!(!path.with_extension("tmp").exists());
    }
}
