//! findash - terminal dashboard for monthly budget plans
//!
//! Monthly plan and fact files are markdown documents with pipe tables kept in
//! a git repository (`personal/Finances/<year>/Plans/Plan_<year>_<month>.md`).
//! This library reads them over HTTP, computes month and year summaries, and
//! writes edits back as commits.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and the access token
//! - `error`: Custom error types
//! - `models`: Money, periods and row records
//! - `markdown`: Line-preserving table codec for monthly files
//! - `store`: Remote (GitHub) and local file stores
//! - `services`: Loading and editing months, yearly aggregation, optimistic
//!   payment tracking
//! - `reports`: Month dashboard and yearly report generation
//! - `display`: Plain-text formatting for CLI output
//! - `host`: Optional embedding shell (theme, haptics, alerts)
//! - `cli`: Command handlers
//! - `tui`: The interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use findash::config::{DashboardPaths, Settings};
//! use findash::services::LedgerService;
//! use findash::store::open_store;
//!
//! let paths = DashboardPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = open_store(&settings, None, None);
//! let month = LedgerService::new(store, settings).load_month(MonthPeriod::current())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod markdown;
pub mod models;
pub mod reports;
pub mod services;
pub mod store;
pub mod tui;

pub use error::{DashboardError, DashboardResult};
