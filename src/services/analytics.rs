//! Yearly analytics service
//!
//! Walks the twelve months of a year one after another. Each month's plan and
//! fact are read in parallel; a month that fails to load is logged and left out.

use crate::error::DashboardResult;
use crate::models::MonthPeriod;

use super::ledger::{LedgerService, MonthData};

/// A loaded month in a yearly series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthEntry {
    pub period: MonthPeriod,
    pub data: MonthData,
}

/// Result of loading a year
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearData {
    pub year: i32,
    /// Months with at least one file, in calendar order
    pub months: Vec<MonthEntry>,
    /// Months that failed to load
    pub skipped: Vec<MonthPeriod>,
}

/// Service for year-level aggregation
pub struct AnalyticsService<'a> {
    ledger: &'a LedgerService,
}

impl<'a> AnalyticsService<'a> {
    /// Create a new analytics service
    pub fn new(ledger: &'a LedgerService) -> Self {
        Self { ledger }
    }

    /// Load every month of `year`
    pub fn load_year(&self, year: i32) -> DashboardResult<YearData> {
        let mut result = YearData {
            year,
            ..Default::default()
        };

        for period in MonthPeriod::year_months(year) {
            match self.ledger.load_month(period) {
                Ok(data) if data.is_empty() => {}
                Ok(data) => result.months.push(MonthEntry { period, data }),
                Err(e) => {
                    tracing::warn!(%period, error = %e, "skipping month");
                    result.skipped.push(period);
                }
            }
        }

        Ok(result)
    }
}
