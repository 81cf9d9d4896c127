//! Terminal User Interface module
//!
//! This module provides the findash dashboard using ratatui: the month view
//! with charts and tables, yearly analytics, and dialogs for data entry.

pub mod app;
pub mod charts;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use charts::{ChartRenderer, ChartSlot, ChartSpec};
pub use terminal::run_tui;
