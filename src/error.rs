//! Custom error types for findash
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for findash operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success HTTP status from the remote store (other than 404 on reads)
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure talking to the remote store
    #[error("Network error: {0}")]
    Network(String),

    /// A write was attempted without a personal access token
    #[error("No GitHub token configured. Run 'findash token set' to add one.")]
    MissingToken,

    /// Expected section, table or row was not found in a markdown file
    #[error("Markdown structure error: {0}")]
    Structure(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl DashboardError {
    /// Create a structure error for a section that could not be located
    pub fn section_not_found(section: impl Into<String>) -> Self {
        Self::Structure(format!("section '{}' not found", section.into()))
    }

    /// Create a structure error for a section without a table
    pub fn table_not_found(section: impl Into<String>) -> Self {
        Self::Structure(format!("no table under section '{}'", section.into()))
    }

    /// Check if this error is caused by a missing token
    pub fn is_missing_token(&self) -> bool {
        matches!(self, Self::MissingToken)
    }

    /// Check if this is a markdown structure error
    pub fn is_structure(&self) -> bool {
        matches!(self, Self::Structure(_))
    }

    /// HTTP status code, if this error came from the remote store
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<crate::models::PeriodParseError> for DashboardError {
    fn from(err: crate::models::PeriodParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::MoneyParseError> for DashboardError {
    fn from(err: crate::models::MoneyParseError) -> Self {
        Self::Validation(format!("Invalid amount: {}", err))
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for findash operations
pub type DashboardResult<T> = Result<T, DashboardError>;
