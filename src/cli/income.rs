//! CLI commands for income rows

use clap::Subcommand;

use super::ledger_kind;
use crate::error::DashboardResult;
use crate::models::{Money, MonthPeriod};
use crate::services::{LedgerService, NewIncome};

/// Income subcommands
#[derive(Subcommand, Debug)]
pub enum IncomeCommands {
    /// Add an income row to the month's plan (or fact)
    Add {
        /// Where the money comes from
        #[arg(short, long)]
        source: String,

        /// Amount, e.g. "85000" or "1 500,50"
        #[arg(short, long, value_parser = Money::parse)]
        amount: Money,

        /// Date received (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,

        /// Write to the fact file instead of the plan
        #[arg(long)]
        fact: bool,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long, value_parser = MonthPeriod::parse)]
        period: Option<MonthPeriod>,
    },
}

/// Handle an income command
pub fn handle_income_command(ledger: &LedgerService, cmd: IncomeCommands) -> DashboardResult<()> {
    match cmd {
        IncomeCommands::Add {
            source,
            amount,
            date,
            note,
            fact,
            period,
        } => {
            let kind = ledger_kind(fact);
            let period = period.unwrap_or_else(MonthPeriod::current);
            let row = ledger.add_income(
                kind,
                period,
                NewIncome {
                    date,
                    source,
                    amount,
                    note,
                },
            )?;

            println!(
                "Added income to {} {}: {} {} on {}",
                kind,
                period,
                row.source,
                row.amount.format_with_symbol(&ledger.settings().currency_symbol),
                row.date
            );
        }
    }

    Ok(())
}
