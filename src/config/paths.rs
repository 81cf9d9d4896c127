//! Path management for findash
//!
//! ## Path Resolution Order
//!
//! 1. `FINDASH_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/findash` on Linux, `~/Library/Application Support/findash`
//!    on macOS, `%APPDATA%\findash\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::DashboardError;

/// Manages all paths used by findash
#[derive(Debug, Clone)]
pub struct DashboardPaths {
    /// Base directory for all findash state
    base_dir: PathBuf,
}

impl DashboardPaths {
    /// Create a new DashboardPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, DashboardError> {
        let base_dir = if let Ok(custom) = std::env::var("FINDASH_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "findash")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    DashboardError::Config("Could not determine a config directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create DashboardPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the stored access token
    pub fn token_file(&self) -> PathBuf {
        self.base_dir.join("token")
    }

    /// Get the path to the log file used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("findash.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), DashboardError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DashboardError::Io(format!("Failed to create config directory: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.token_file(), temp_dir.path().join("token"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
