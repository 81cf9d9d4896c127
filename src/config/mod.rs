//! Configuration module for findash
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence
//! - Access token storage

pub mod paths;
pub mod settings;
pub mod token;

pub use paths::DashboardPaths;
pub use settings::Settings;
pub use token::{Token, TokenSource, TokenStore};
