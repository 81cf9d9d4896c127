//! Reports module for findash
//!
//! Pure aggregation over loaded months: the month dashboard with its totals
//! and category breakdown, and the yearly plan vs. fact comparison.

pub mod month;
pub mod yearly;

pub use month::{expense_breakdown, CategoryShare, FactTotals, MonthDashboard, MonthTotals};
pub use yearly::{MonthSummary, YearlyReport};
