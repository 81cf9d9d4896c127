//! Store layer for findash
//!
//! Monthly files live in a git repository. [`GitHubStore`] reads them from the
//! raw-content host and writes through the contents API; [`LocalStore`] works
//! on a directory checkout with the same revision semantics.

pub mod github;
pub mod local;

pub use github::GitHubStore;
pub use local::LocalStore;

use std::path::Path;
use std::sync::Arc;

use crate::config::{Settings, Token};
use crate::error::DashboardResult;

/// Open the store selected on the command line: a local checkout when a
/// directory is given, GitHub otherwise
pub fn open_store(
    settings: &Settings,
    local: Option<&Path>,
    token: Option<Token>,
) -> Arc<dyn FileStore> {
    match local {
        Some(root) => {
            tracing::debug!(root = %root.display(), "using local store");
            Arc::new(LocalStore::new(root))
        }
        None => Arc::new(GitHubStore::new(settings, token)),
    }
}

/// File content together with the revision marker it was read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub content: String,
    pub revision: String,
}

/// Read/write access to repository files addressed by repo-relative path
pub trait FileStore: Send + Sync {
    /// Human readable description of where files come from
    fn describe(&self) -> String;

    /// Read a file. A missing file is `Ok(None)`.
    fn read(&self, path: &str) -> DashboardResult<Option<String>>;

    /// Read a file for editing. The revision belongs to exactly the returned
    /// content. A missing file is `Ok(None)`.
    fn read_for_update(&self, path: &str) -> DashboardResult<Option<Snapshot>>;

    /// Replace a file's content. `revision` must come from the
    /// [`Snapshot`] the new content was built from, or be `None` when
    /// creating the file. A file that changed since is refused.
    fn write(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&str>,
    ) -> DashboardResult<()>;

    /// Fail early when writes are impossible (e.g. no token)
    fn ensure_writable(&self) -> DashboardResult<()>;
}

/// Reject absolute paths and parent-directory segments
pub(crate) fn validate_path(path: &str) -> DashboardResult<()> {
    if path.is_empty()
        || path.starts_with('/')
        || path.split('/').any(|segment| segment == ".." || segment.is_empty())
    {
        return Err(crate::error::DashboardError::Validation(format!(
            "invalid repository path '{}'",
            path
        )));
    }
    Ok(())
}


#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::{FileStore, LocalStore, Snapshot};
    use crate::error::DashboardResult;

    /// Local store where another client commits right after the first
    /// read for update, so the caller holds a stale snapshot
    pub(crate) struct InterveningCommit {
        inner: LocalStore,
        edit: fn(&str) -> String,
        fired: AtomicBool,
    }

    impl InterveningCommit {
        pub(crate) fn new(inner: LocalStore, edit: fn(&str) -> String) -> Self {
            Self {
                inner,
                edit,
                fired: AtomicBool::new(false),
            }
        }
    }

    impl FileStore for InterveningCommit {
        fn describe(&self) -> String {
            self.inner.describe()
        }

        fn read(&self, path: &str) -> DashboardResult<Option<String>> {
            self.inner.read(path)
        }

        fn read_for_update(&self, path: &str) -> DashboardResult<Option<Snapshot>> {
            let snapshot = self.inner.read_for_update(path)?;
            if let Some(seen) = &snapshot {
                if !self.fired.swap(true, Ordering::SeqCst) {
                    let edited = (self.edit)(&seen.content);
                    self.inner
                        .write(path, &edited, "other client", Some(&seen.revision))?;
                }
            }
            Ok(snapshot)
        }

        fn write(
            &self,
            path: &str,
            content: &str,
            message: &str,
            revision: Option<&str>,
        ) -> DashboardResult<()> {
            self.inner.write(path, content, message, revision)
        }

        fn ensure_writable(&self) -> DashboardResult<()> {
            self.inner.ensure_writable()
        }
    }
}
