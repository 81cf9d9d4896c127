//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analytics;
pub mod config;
pub mod expense;
pub mod export;
pub mod income;
pub mod show;
pub mod token;

pub use analytics::handle_analytics_command;
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use income::{handle_income_command, IncomeCommands};
pub use show::handle_show_command;
pub use token::{handle_token_command, TokenCommands};

use crate::models::LedgerKind;

/// `--fact` switches a write from the plan to the fact file
pub(crate) fn ledger_kind(fact: bool) -> LedgerKind {
    if fact {
        LedgerKind::Fact
    } else {
        LedgerKind::Plan
    }
}
