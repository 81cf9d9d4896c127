//! Personal access token storage
//!
//! The token lives in a `token` file in the data directory (mode 0600 on Unix)
//! and can be overridden with `FINDASH_GITHUB_TOKEN`. It is held in zeroizing
//! memory and never printed.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use zeroize::Zeroizing;

use super::paths::DashboardPaths;
use crate::error::DashboardError;

/// Environment variable that takes precedence over the token file
pub const TOKEN_ENV: &str = "FINDASH_GITHUB_TOKEN";

/// A personal access token, zeroed on drop
#[derive(Clone)]
pub struct Token(Zeroizing<String>);

impl Token {
    /// Wrap a token, rejecting empty input
    pub fn new(value: impl Into<String>) -> Result<Self, DashboardError> {
        let value = Zeroizing::new(value.into());
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DashboardError::Validation("Token cannot be empty".into()));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DashboardError::Validation(
                "Token cannot contain whitespace".into(),
            ));
        }
        Ok(Self(Zeroizing::new(trimmed.to_string())))
    }

    /// The raw token, for building the Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form safe for display, e.g. `ghp_…a1b2`
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

/// Where the active token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    File,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "{}", TOKEN_ENV),
            Self::File => write!(f, "token file"),
        }
    }
}

/// Loads, saves and clears the token file
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
    read_env: bool,
}

impl TokenStore {
    pub fn new(paths: &DashboardPaths) -> Self {
        Self {
            path: paths.token_file(),
            read_env: true,
        }
    }

    /// A store that only looks at the file (tests)
    pub fn file_only(paths: &DashboardPaths) -> Self {
        Self {
            path: paths.token_file(),
            read_env: false,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the active token, environment first
    pub fn load(&self) -> Result<Option<(Token, TokenSource)>, DashboardError> {
        if self.read_env {
            if let Ok(value) = std::env::var(TOKEN_ENV) {
                if !value.trim().is_empty() {
                    return Ok(Some((Token::new(value)?, TokenSource::Environment)));
                }
            }
        }

        if !self.path.exists() {
            return Ok(None);
        }

        let contents = Zeroizing::new(
            std::fs::read_to_string(&self.path)
                .map_err(|e| DashboardError::Io(format!("Failed to read token file: {}", e)))?,
        );
        if contents.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some((Token::new(contents.as_str())?, TokenSource::File)))
    }

    /// Load just the token
    pub fn token(&self) -> Result<Option<Token>, DashboardError> {
        Ok(self.load()?.map(|(token, _)| token))
    }

    /// Persist a token, readable only by the owner
    pub fn save(&self, token: &Token) -> Result<(), DashboardError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DashboardError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|e| DashboardError::Io(format!("Failed to open token file: {}", e)))?;

        // The creation mode does not apply to an existing file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(|e| {
                    DashboardError::Io(format!("Failed to restrict token file: {}", e))
                })?;
        }

        file.write_all(token.expose().as_bytes())
            .map_err(|e| DashboardError::Io(format!("Failed to write token file: {}", e)))?;

        tracing::info!(path = %self.path.display(), "token saved");
        Ok(())
    }

    /// Remove the token file. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool, DashboardError> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .map_err(|e| DashboardError::Io(format!("Failed to remove token file: {}", e)))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, TokenStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, TokenStore::file_only(&paths))
    }

    #[test]
    fn test_token_validation() {
        assert!(Token::new("").is_err());
        assert!(Token::new("   ").is_err());
        assert!(Token::new("ghp abc").is_err());
        assert_eq!(Token::new("  ghp_abc\n").unwrap().expose(), "ghp_abc");
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = Token::new("ghp_secretvalue").unwrap();
        assert!(!format!("{:?}", token).contains("secret"));
        assert_eq!(token.masked(), "ghp_…alue");
    }

    #[test]
    fn test_save_load_clear() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_none());

        store.save(&Token::new("ghp_abcdef123").unwrap()).unwrap();
        let (token, source) = store.load().unwrap().unwrap();
        assert_eq!(token.expose(), "ghp_abcdef123");
        assert_eq!(source, TokenSource::File);

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(store.token().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = store();
        store.save(&Token::new("ghp_abcdef123").unwrap()).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_tightens_existing_token_file() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "ghp_old_and_much_longer_token").unwrap();
        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&Token::new("ghp_abcdef123").unwrap()).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "ghp_abcdef123");
    }
}
