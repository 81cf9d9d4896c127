//! Month report command

use crate::display::format_month_report;
use crate::error::DashboardResult;
use crate::models::MonthPeriod;
use crate::reports::MonthDashboard;
use crate::services::LedgerService;

/// Print the dashboard of one month
pub fn handle_show_command(
    ledger: &LedgerService,
    period: Option<MonthPeriod>,
) -> DashboardResult<()> {
    let period = period.unwrap_or_else(MonthPeriod::current);
    let data = ledger.load_month(period)?;
    let report = MonthDashboard::generate(period, &data);

    print!(
        "{}",
        format_month_report(&report, &ledger.settings().currency_symbol)
    );
    Ok(())
}
