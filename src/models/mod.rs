//! Core data models for findash
//!
//! This module contains the data structures that represent the budgeting
//! domain: amounts, months, and the rows of plan and fact files.

pub mod category;
pub mod ledger;
pub mod money;
pub mod period;

pub use category::DEFAULT_CATEGORIES;
pub use ledger::{
    clean_label, ExpenseRow, IncomeRow, LedgerKind, MonthlyFact, MonthlyPlan, PaidExpenseRow,
    RowId, TableKind,
};
pub use money::{parse_amount, Money, MoneyParseError};
pub use period::{MonthPeriod, PeriodParseError};
