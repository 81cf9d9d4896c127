//! Display formatting for terminal output
//!
//! Provides utilities for formatting reports for the CLI, including tables
//! and text bar charts.

pub mod month;
pub mod report;
pub mod yearly;

pub use month::{format_expense_table, format_month_report, NO_DATA};
pub use yearly::format_yearly_report;
