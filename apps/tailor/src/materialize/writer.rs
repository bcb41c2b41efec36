//! Filesystem side of materialization. Every operation is attempted at most
//! twice; the second failure is returned to the caller for the run report.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::FilesystemError;

const MAX_ATTEMPTS: u32 = 2;

fn with_retry<T>(
    what: &str,
    path: &Path,
    mut op: impl FnMut() -> Result<T, FilesystemError>,
) -> Result<T, FilesystemError> {
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if attempt < MAX_ATTEMPTS => {
                warn!(path = %path.display(), attempt, "{what} failed, retrying: {e}");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Creates `dir` and its ancestors. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<(), FilesystemError> {
    with_retry("create directory", dir, || {
        fs::create_dir_all(dir).map_err(|source| FilesystemError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    })
}

/// Replaces `path` with `contents` via a temp file in the same directory and a rename,
/// so readers never observe a partially written document.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FilesystemError> {
    with_retry("write", path, || {
        write_once(path, contents).map_err(|source| FilesystemError::Write {
            path: path.to_path_buf(),
            source,
        })
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "document written");
    Ok(())
}

fn write_once(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("a").join("b");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_fails_when_path_is_a_file() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("occupied");
        fs::write(&file, b"x").unwrap();
        let err = ensure_dir(&file.join("child")).unwrap_err();
        assert!(matches!(err, FilesystemError::CreateDir { .. }));
    }

    #[test]
    fn test_write_atomic_replaces_contents() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("cv.docx");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "temp files must not be left behind");
    }

    #[test]
    fn test_write_atomic_missing_directory_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing").join("cv.docx");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, FilesystemError::Write { .. }));
    }

    #[test]
    fn test_retry_runs_operation_twice() {
        let mut calls = 0;
        let result: Result<(), FilesystemError> = with_retry("write", Path::new("p"), || {
            calls += 1;
            Err(FilesystemError::Write {
                path: "p".into(),
                source: std::io::Error::other("boom"),
            })
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_retry_recovers_on_second_attempt() {
        let mut calls = 0;
        let result = with_retry("write", Path::new("p"), || {
            calls += 1;
            if calls == 1 {
                Err(FilesystemError::Write {
                    path: "p".into(),
                    source: std::io::Error::other("transient"),
                })
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap(), 2);
    }
}
