//! CLI commands for expense rows

use clap::Subcommand;

use super::ledger_kind;
use crate::display::{format_expense_table, NO_DATA};
use crate::error::{DashboardError, DashboardResult};
use crate::markdown::RowSelector;
use crate::models::category::is_default_category;
use crate::models::{Money, MonthPeriod, DEFAULT_CATEGORIES};
use crate::reports::MonthDashboard;
use crate::services::{LedgerService, NewExpense};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Add a planned (or actual) expense
    Add {
        /// Expense category
        #[arg(short, long)]
        category: String,

        /// Amount, e.g. "1500" or "1 500,50"
        #[arg(short, long, value_parser = Money::parse)]
        amount: Money,

        /// Due date in a plan, spending date in a fact
        #[arg(short, long)]
        due: Option<String>,

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

    /// List planned expenses with their row numbers
    List {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long, value_parser = MonthPeriod::parse)]
        period: Option<MonthPeriod>,
    },

    /// Mark a planned expense as paid
    Pay {
        /// Row number from `expense list`
        #[arg(conflicts_with_all = ["category", "amount"])]
        row: Option<usize>,

        /// Select the row by category instead of number
        #[arg(short, long, requires = "amount")]
        category: Option<String>,

        /// Amount of the row selected by category
        #[arg(short, long, requires = "category", value_parser = Money::parse)]
        amount: Option<Money>,

        /// Payment date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long, value_parser = MonthPeriod::parse)]
        period: Option<MonthPeriod>,
    },

    /// Show the suggested expense categories
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command(ledger: &LedgerService, cmd: ExpenseCommands) -> DashboardResult<()> {
    let symbol = ledger.settings().currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            category,
            amount,
            due,
            note,
            fact,
            period,
        } => {
            let kind = ledger_kind(fact);
            let period = period.unwrap_or_else(MonthPeriod::current);
            if !is_default_category(&category) {
                tracing::debug!(%category, "category outside the default list");
            }

            let row = ledger.add_expense(
                kind,
                period,
                NewExpense {
                    category,
                    amount,
                    date: due,
                    note,
                },
            )?;
            println!(
                "Added expense to {} {}: {} {}",
                kind,
                period,
                row.category,
                row.amount.format_with_symbol(symbol)
            );
        }

        ExpenseCommands::List { period } => {
            let period = period.unwrap_or_else(MonthPeriod::current);
            let data = ledger.load_month(period)?;
            let report = MonthDashboard::generate(period, &data);

            if report.plan.is_none() {
                println!("{} for {}", NO_DATA, period);
                return Ok(());
            }
            let rows = report.expense_rows();
            if rows.is_empty() {
                println!("No unpaid expenses in {}", period.friendly());
            } else {
                print!("{}", format_expense_table(&rows, symbol));
            }
        }

        ExpenseCommands::Pay {
            row,
            category,
            amount,
            date,
            note,
            period,
        } => {
            let period = period.unwrap_or_else(MonthPeriod::current);
            let selector = match (row, category, amount) {
                (Some(position), _, _) => RowSelector::Position(position),
                (None, Some(category), Some(amount)) => RowSelector::Value { category, amount },
                _ => {
                    return Err(DashboardError::Validation(
                        "Give a row number or --category with --amount".into(),
                    ))
                }
            };

            let paid = ledger.mark_paid(period, &selector, date, note)?;
            println!(
                "Marked as paid: {} {} on {}",
                paid.category,
                paid.amount.format_with_symbol(symbol),
                paid.date_paid
            );
        }

        ExpenseCommands::Categories => {
            for category in DEFAULT_CATEGORIES {
                println!("{}", category);
            }
        }
    }

    Ok(())
}
