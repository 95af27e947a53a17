//! Filesystem helpers.
//!
//! Every filesystem error leaving this module carries the path it happened on.
//! Output files are staged in a temporary file next to their destination and
//! only renamed into place once fully written, so an aborted run never leaves
//! a truncated wheel behind.

use std::fs::{self, File};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, WheelError};

/// Creates `dir` and all of its parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| WheelError::io(dir, e))
}

/// Reads a whole file.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| WheelError::io(path, e))
}

/// Reads a whole UTF-8 file.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| WheelError::io(path, e))
}

/// Runs `write` against a temporary file in the destination directory and
/// moves the result to `path` if it succeeds. On error the temporary file is
/// removed when dropped.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| WheelError::io(dir, e))?;
    write(staged.as_file_mut())?;
    staged
        .as_file()
        .sync_all()
        .map_err(|e| WheelError::io(staged.path(), e))?;
    staged
        .persist(path)
        .map_err(|e| WheelError::io(path, e.error))?;
    set_readable(path)
}

#[cfg(unix)]
/// Temporary files are created `0o600`; published artifacts should be world-readable.
fn set_readable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644)).map_err(|e| WheelError::io(path, e))
}

#[cfg(not(unix))]
fn set_readable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn persists_on_success() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.bin");
        write_atomically(&target, |file| Ok(file.write_all(b"payload")?)).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"payload");
    }

    #[test]
    fn leaves_nothing_on_failure() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.bin");
        let result = write_atomically(&target, |file| {
            file.write_all(b"partial")?;
            Err(WheelError::DuplicateEntry("x".into()))
        });
        assert!(result.is_err());
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
