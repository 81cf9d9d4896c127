//! User settings for findash
//!
//! Holds the coordinates of the repository that stores the markdown files and
//! display preferences.

use serde::{Deserialize, Serialize};

use super::paths::DashboardPaths;
use crate::error::DashboardError;
use crate::models::{LedgerKind, MonthPeriod};

/// User settings for findash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Repository owner (user or organisation)
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Branch holding the files
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Folder holding the year directories
    #[serde(default = "default_finances_path")]
    pub finances_path: String,

    /// Host serving raw file content
    #[serde(default = "default_raw_host")]
    pub raw_host: String,

    /// Host of the REST API used for writes
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Append a timestamp to raw reads so the CDN cache is skipped
    #[serde(default = "default_true")]
    pub bypass_cache: bool,

    /// Currency symbol shown in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for dates written into files (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_owner() -> String {
    "danilavladimirovpr01-sketch".to_string()
}

fn default_repo() -> String {
    "finance-dashboard".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_finances_path() -> String {
    "personal/Finances".to_string()
}

fn default_raw_host() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_api_host() -> String {
    "https://api.github.com".to_string()
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "₽".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

/// Keys accepted by `findash config set`
pub const SETTABLE_KEYS: [&str; 9] = [
    "owner",
    "repo",
    "branch",
    "finances_path",
    "raw_host",
    "api_host",
    "bypass_cache",
    "currency_symbol",
    "date_format",
];

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            owner: default_owner(),
            repo: default_repo(),
            branch: default_branch(),
            finances_path: default_finances_path(),
            raw_host: default_raw_host(),
            api_host: default_api_host(),
            bypass_cache: default_true(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DashboardPaths) -> Result<Self, DashboardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                DashboardError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DashboardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DashboardPaths) -> Result<(), DashboardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            DashboardError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Update one setting by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        let value = value.trim();
        let require_non_empty = |v: &str| {
            if v.is_empty() {
                Err(DashboardError::Validation(format!("'{}' cannot be empty", key)))
            } else {
                Ok(v.to_string())
            }
        };

        match key {
            "owner" => self.owner = require_non_empty(value)?,
            "repo" => self.repo = require_non_empty(value)?,
            "branch" => self.branch = require_non_empty(value)?,
            "finances_path" => self.finances_path = value.trim_matches('/').to_string(),
            "raw_host" => self.raw_host = require_url(key, value)?,
            "api_host" => self.api_host = require_url(key, value)?,
            "bypass_cache" => {
                self.bypass_cache = value.parse().map_err(|_| {
                    DashboardError::Validation(format!(
                        "'{}' must be true or false, got '{}'",
                        key, value
                    ))
                })?
            }
            "currency_symbol" => self.currency_symbol = require_non_empty(value)?,
            "date_format" => {
                let sample = chrono::NaiveDate::from_ymd_opt(2025, 1, 31)
                    .map(|d| d.format(value).to_string())
                    .unwrap_or_default();
                if !sample.contains("31") {
                    return Err(DashboardError::Validation(format!(
                        "date format '{}' must include the day",
                        value
                    )));
                }
                self.date_format = value.to_string();
            }
            other => {
                return Err(DashboardError::Config(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    other,
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Repository path of a month's file, e.g.
    /// `personal/Finances/2025/Plans/Plan_2025_03.md`
    pub fn file_path(&self, kind: LedgerKind, period: MonthPeriod) -> String {
        let file = format!(
            "{}/{}/{}_{}_{:02}.md",
            period.year,
            kind.dir_name(),
            kind.file_prefix(),
            period.year,
            period.month
        );
        if self.finances_path.is_empty() {
            file
        } else {
            format!("{}/{}", self.finances_path.trim_matches('/'), file)
        }
    }

    /// "owner/repo@branch" label
    pub fn repository_label(&self) -> String {
        format!("{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

fn require_url(key: &str, value: &str) -> Result<String, DashboardError> {
    if value.starts_with("https://") || value.starts_with("http://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(DashboardError::Validation(format!(
            "'{}' must be an http(s) URL, got '{}'",
            key, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.branch, "main");
        assert_eq!(settings.finances_path, "personal/Finances");
        assert!(settings.bypass_cache);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set("owner", "someone").unwrap();
        settings.set("bypass_cache", "false").unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.owner, "someone");
        assert!(!loaded.bypass_cache);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"repo": "money"}"#).unwrap();
        assert_eq!(settings.repo, "money");
        assert_eq!(settings.api_host, "https://api.github.com");
    }

    #[test]
    fn test_set_validation() {
        let mut settings = Settings::default();
        assert!(settings.set("raw_host", "ftp://x").is_err());
        assert!(settings.set("owner", " ").is_err());
        assert!(settings.set("nope", "1").is_err());
        assert!(settings.set("date_format", "%Y").is_err());
        settings.set("api_host", "https://ghe.example.com/api/v3/").unwrap();
        assert_eq!(settings.api_host, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_file_path() {
        let settings = Settings::default();
        let period = MonthPeriod::new(2025, 3).unwrap();
        assert_eq!(
            settings.file_path(LedgerKind::Plan, period),
            "personal/Finances/2025/Plans/Plan_2025_03.md"
        );
        assert_eq!(
            settings.file_path(LedgerKind::Fact, period),
            "personal/Finances/2025/Facts/Fact_2025_03.md"
        );
    }
}
