//! Month report display formatting
//!
//! Renders the month dashboard as summary cards, a category breakdown with
//! text bars, and tables for incomes, expenses and remaining payments.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage, left_align, title, truncate};
use crate::models::{ExpenseRow, IncomeRow, RowId};
use crate::reports::MonthDashboard;

/// Placeholder for an empty table or an absent month
pub const NO_DATA: &str = "No data";

const BAR_WIDTH: usize = 24;

#[derive(Tabled)]
struct IncomeLine {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct ExpenseLine {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return format!("{}\n", NO_DATA);
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format income rows as a table
pub fn format_income_table(rows: &[IncomeRow], symbol: &str) -> String {
    table(
        rows.iter()
            .enumerate()
            .map(|(i, row)| IncomeLine {
                position: i + 1,
                date: row.date.clone(),
                source: row.source.clone(),
                amount: row.amount.format_with_symbol(symbol),
                note: row.note.clone(),
            })
            .collect(),
    )
}

/// Format expense rows as a table, numbered by their position in the file
pub fn format_expense_table(rows: &[(RowId, &ExpenseRow)], symbol: &str) -> String {
    table(
        rows.iter()
            .map(|(id, row)| ExpenseLine {
                position: id.position,
                category: row.clean_category(),
                amount: row.amount.format_with_symbol(symbol),
                date: row.due_date.clone(),
                note: row.note.clone(),
            })
            .collect(),
    )
}

/// Format the full month report
pub fn format_month_report(report: &MonthDashboard, symbol: &str) -> String {
    let mut output = String::new();
    let header = format!(
        "{} · {} {}",
        report.period.friendly(),
        report.period.month_name_ru(),
        report.period.year
    );
    output.push_str(&title(&header));

    if report.is_empty() {
        output.push_str(&format!("{} for {}\n", NO_DATA, report.period));
        return output;
    }

    let totals = &report.totals;
    output.push_str(&format!(
        "Income:   {:>14}\nExpenses: {:>14}\nPaid:     {:>14}\nBalance:  {:>14}\n",
        totals.income.format_whole(symbol),
        totals.expenses.format_whole(symbol),
        totals.paid.format_whole(symbol),
        totals.balance.format_whole(symbol),
    ));
    if let Some(fact) = &report.fact_totals {
        output.push_str(&format!(
            "Actual:   {} in, {} out\n",
            fact.income.format_whole(symbol),
            fact.expenses.format_whole(symbol)
        ));
    }
    output.push('\n');

    output.push_str(&title("Expenses by category"));
    output.push_str(&format_breakdown(report, symbol));
    output.push('\n');

    let incomes = report
        .plan
        .as_ref()
        .map(|p| p.incomes.as_slice())
        .unwrap_or_default();
    output.push_str(&title("Incomes"));
    output.push_str(&format_income_table(incomes, symbol));
    output.push('\n');

    output.push_str(&title("Expenses"));
    output.push_str(&format_expense_table(&report.expense_rows(), symbol));
    output.push('\n');

    output.push_str(&title("Remaining payments"));
    output.push_str(&format_expense_table(&report.remaining_rows(), symbol));

    output
}

/// Category breakdown as proportional text bars
pub fn format_breakdown(report: &MonthDashboard, symbol: &str) -> String {
    if report.breakdown.is_empty() {
        return format!("{}\n", NO_DATA);
    }

    let max = report
        .breakdown
        .iter()
        .map(|s| s.amount)
        .max()
        .unwrap_or_default()
        .to_f64();
    let label_width = report
        .breakdown
        .iter()
        .map(|s| s.category.chars().count().min(24))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for share in &report.breakdown {
        output.push_str(&format!(
            "{} {} {:>6} {}\n",
            left_align(&truncate(&share.category, 24), label_width),
            format_bar(share.amount.to_f64(), max, BAR_WIDTH),
            format_percentage(share.percentage),
            share.amount.format_whole(symbol)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthPeriod, MonthlyPlan};
    use crate::services::MonthData;

    fn report(plan: Option<MonthlyPlan>) -> MonthDashboard {
        MonthDashboard::generate(
            MonthPeriod::new(2025, 3).unwrap(),
            &MonthData { plan, fact: None },
        )
    }

    #[test]
    fn test_absent_month_shows_placeholder() {
        let text = format_month_report(&report(None), "₽");
        assert!(text.contains("No data for 2025-03"));
    }

    #[test]
    fn test_empty_tables_show_placeholder() {
        let text = format_month_report(&report(Some(MonthlyPlan::default())), "₽");
        assert!(text.contains("Balance:"));
        assert_eq!(text.matches(NO_DATA).count(), 4);
    }

    #[test]
    fn test_expense_table_uses_file_positions() {
        let rows = [
            ExpenseRow {
                category: "**Кредит**".into(),
                amount: Money::from_rubles(12000),
                ..Default::default()
            },
        ];
        let listed = vec![(RowId::expense(3), &rows[0])];
        let text = format_expense_table(&listed, "₽");
        assert!(text.contains("Кредит"));
        assert!(!text.contains("**"));
        assert!(text.contains("12 000 ₽"));
        assert!(text.contains(" 3 "));
    }
}
