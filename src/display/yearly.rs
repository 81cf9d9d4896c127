//! Yearly report display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::month::NO_DATA;
use super::report::{format_bar, title};
use crate::reports::YearlyReport;

#[derive(Tabled)]
struct YearLine {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Plan income")]
    plan_income: String,
    #[tabled(rename = "Plan expenses")]
    plan_expenses: String,
    #[tabled(rename = "Fact income")]
    fact_income: String,
    #[tabled(rename = "Fact expenses")]
    fact_expenses: String,
}

/// Format the yearly comparison as a table plus expense bars
pub fn format_yearly_report(report: &YearlyReport, symbol: &str) -> String {
    let mut output = title(&format!("Analytics {}", report.year));

    if report.is_empty() {
        output.push_str(&format!("{} for {}\n", NO_DATA, report.year));
        return output;
    }

    let dash = |present: bool, text: String| if present { text } else { "—".to_string() };
    let mut lines: Vec<YearLine> = report
        .months
        .iter()
        .map(|m| YearLine {
            month: m.period.month_name().to_string(),
            plan_income: dash(m.has_plan, m.plan_income.format_whole(symbol)),
            plan_expenses: dash(m.has_plan, m.plan_expenses.format_whole(symbol)),
            fact_income: dash(m.has_fact, m.fact_income.format_whole(symbol)),
            fact_expenses: dash(m.has_fact, m.fact_expenses.format_whole(symbol)),
        })
        .collect();
    lines.push(YearLine {
        month: "Total".into(),
        plan_income: report.total_plan_income().format_whole(symbol),
        plan_expenses: report.total_plan_expenses().format_whole(symbol),
        fact_income: report.total_fact_income().format_whole(symbol),
        fact_expenses: report.total_fact_expenses().format_whole(symbol),
    });

    let mut table = Table::new(lines);
    table.with(Style::rounded());
    output.push_str(&format!("{}\n\n", table));

    output.push_str(&title("Expenses, plan vs. fact"));
    let max = report.max_amount().to_f64();
    for m in &report.months {
        output.push_str(&format!(
            "{} plan {}\n    fact {}\n",
            m.period.short_label(),
            format_bar(m.plan_expenses.to_f64(), max, 30),
            format_bar(m.fact_expenses.to_f64(), max, 30),
        ));
    }

    if !report.skipped.is_empty() {
        let skipped: Vec<String> = report.skipped.iter().map(|p| p.to_string()).collect();
        output.push_str(&format!("\nSkipped (failed to load): {}\n", skipped.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::YearData;

    #[test]
    fn test_empty_year() {
        let report = YearlyReport::generate(&YearData {
            year: 2024,
            ..Default::default()
        });
        assert!(format_yearly_report(&report, "₽").contains("No data for 2024"));
    }
}
