//! Service layer for findash
//!
//! The service layer provides the read-mutate-write cycle on top of the
//! store and markdown codec, handling validation and commit messages.

pub mod analytics;
pub mod ledger;
pub mod optimistic;

pub use analytics::{AnalyticsService, MonthEntry, YearData};
pub use ledger::{LedgerService, MonthData, NewExpense, NewIncome};
pub use optimistic::{PaymentState, PaymentTracker};
