//! Yearly analytics command

use crate::display::format_yearly_report;
use crate::error::DashboardResult;
use crate::models::MonthPeriod;
use crate::reports::YearlyReport;
use crate::services::{AnalyticsService, LedgerService};

/// Print the plan vs. fact comparison of a year
pub fn handle_analytics_command(ledger: &LedgerService, year: Option<i32>) -> DashboardResult<()> {
    let year = year.unwrap_or_else(|| MonthPeriod::current().year);
    let data = AnalyticsService::new(ledger).load_year(year)?;
    let report = YearlyReport::generate(&data);

    print!(
        "{}",
        format_yearly_report(&report, &ledger.settings().currency_symbol)
    );
    for period in &report.skipped {
        eprintln!("Warning: {} could not be loaded and was skipped", period.friendly());
    }
    Ok(())
}
