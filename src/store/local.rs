//! Directory-backed file store
//!
//! Works on a local checkout of the finances repository. The revision marker
//! of a file is the hex SHA-256 of its content, and writes carrying a stale
//! marker are refused with status 409 the same way the remote API refuses them.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use super::{validate_path, FileStore, Snapshot};
use crate::error::{DashboardError, DashboardResult};

/// File store rooted at a local directory
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> DashboardResult<PathBuf> {
        validate_path(path)?;
        Ok(self.root.join(path))
    }

    fn read_bytes(&self, path: &str) -> DashboardResult<Option<Vec<u8>>> {
        let full = self.resolve(path)?;
        if !full.exists() {
            return Ok(None);
        }
        fs::read(&full).map(Some).map_err(|e| {
            DashboardError::Storage(format!("Failed to read {}: {}", full.display(), e))
        })
    }
}

/// Hex SHA-256 of a file's content
pub fn content_revision(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

impl FileStore for LocalStore {
    fn describe(&self) -> String {
        format!("local:{}", self.root.display())
    }

    fn read(&self, path: &str) -> DashboardResult<Option<String>> {
        let full = self.resolve(path)?;
        if !full.exists() {
            return Ok(None);
        }
        fs::read_to_string(&full)
            .map(Some)
            .map_err(|e| DashboardError::Storage(format!("Failed to read {}: {}", full.display(), e)))
    }

    fn read_for_update(&self, path: &str) -> DashboardResult<Option<Snapshot>> {
        let Some(bytes) = self.read_bytes(path)? else {
            return Ok(None);
        };
        let revision = content_revision(&bytes);
        let content = String::from_utf8(bytes).map_err(|e| {
            DashboardError::Storage(format!("{} is not valid UTF-8: {}", path, e))
        })?;
        Ok(Some(Snapshot { content, revision }))
    }

    fn write(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&str>,
    ) -> DashboardResult<()> {
        let full = self.resolve(path)?;
        let current = self.read_bytes(path)?.map(|bytes| content_revision(&bytes));

        match (current.as_deref(), revision) {
            (Some(actual), Some(expected)) if actual != expected => {
                return Err(DashboardError::Http {
                    status: 409,
                    message: format!("{} does not match {}", path, expected),
                });
            }
            (Some(_), None) => {
                return Err(DashboardError::Http {
                    status: 422,
                    message: format!("{} already exists and no revision was supplied", path),
                });
            }
            (None, Some(expected)) => {
                return Err(DashboardError::Http {
                    status: 409,
                    message: format!("{} does not exist at revision {}", path, expected),
                });
            }
            _ => {}
        }

        write_atomic(&full, content.as_bytes())?;
        tracing::info!(path, message, "file written");
        Ok(())
    }

    fn ensure_writable(&self) -> DashboardResult<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(DashboardError::Storage(format!(
                "Local repository {} is not a directory",
                self.root.display()
            )))
        }
    }
}

/// Write a file atomically (write to temp, then rename)
fn write_atomic(path: &Path, bytes: &[u8]) -> DashboardResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DashboardError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut file = File::create(&temp_path)
        .map_err(|e| DashboardError::Storage(format!("Failed to create temp file: {}", e)))?;
    file.write_all(bytes)
        .map_err(|e| DashboardError::Storage(format!("Failed to write data: {}", e)))?;
    file.sync_all()
        .map_err(|e| DashboardError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        DashboardError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PATH: &str = "personal/Finances/2025/Plans/Plan_2025_03.md";

    #[test]
    fn test_missing_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path());

        assert!(store.read(PATH).unwrap().is_none());
        assert!(store.read_for_update(PATH).unwrap().is_none());
    }

    #[test]
    fn test_create_then_update() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path());

        store.write(PATH, "# v1\n", "create", None).unwrap();
        assert_eq!(store.read(PATH).unwrap().as_deref(), Some("# v1\n"));

        let snapshot = store.read_for_update(PATH).unwrap().unwrap();
        assert_eq!(snapshot.content, "# v1\n");
        assert_eq!(snapshot.revision, content_revision(b"# v1\n"));
        assert_eq!(snapshot.revision.len(), 64);

        store
            .write(PATH, "# v2\n", "update", Some(&snapshot.revision))
            .unwrap();
        assert_eq!(store.read(PATH).unwrap().as_deref(), Some("# v2\n"));
        assert!(!temp_dir.path().join(format!("{}.tmp", PATH)).exists());
    }

    #[test]
    fn test_stale_revision_is_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path());

        store.write(PATH, "# v1\n", "create", None).unwrap();
        let stale = store.read_for_update(PATH).unwrap().unwrap().revision;
        store.write(PATH, "# v2\n", "update", Some(&stale)).unwrap();

        let err = store.write(PATH, "# v3\n", "late", Some(&stale)).unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(store.read(PATH).unwrap().as_deref(), Some("# v2\n"));
    }

    #[test]
    fn test_overwrite_without_revision_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path());

        store.write(PATH, "# v1\n", "create", None).unwrap();
        let err = store.write(PATH, "# v2\n", "blind", None).unwrap_err();
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_ensure_writable() {
        let temp_dir = TempDir::new().unwrap();
        assert!(LocalStore::new(temp_dir.path()).ensure_writable().is_ok());
        assert!(LocalStore::new(temp_dir.path().join("missing"))
            .ensure_writable()
            .is_err());
    }
}
