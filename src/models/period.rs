//! Month period representation
//!
//! Plan and fact files are kept per calendar month, so the only period type
//! is a (year, month) pair.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_NAMES_RU: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    /// Create a period, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Get the current month
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::containing(today)
    }

    /// Get the month containing a date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// All twelve months of a year, January first
    pub fn year_months(year: i32) -> impl Iterator<Item = Self> {
        (1..=12).map(move |month| Self { year, month })
    }

    /// Parse "YYYY-MM" (also accepts "YYYY/MM" and "MM.YYYY")
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        let (year, month) = if let Some((y, m)) = s.split_once(['-', '/']) {
            (y, m)
        } else if let Some((m, y)) = s.split_once('.') {
            (y, m)
        } else {
            return Err(invalid());
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// Parse an optional period string, defaulting to the current month
    pub fn parse_or_current(s: Option<&str>) -> Result<Self, PeriodParseError> {
        match s {
            Some(s) => Self::parse(s),
            None => Ok(Self::current()),
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// English month name
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES_EN[(self.month - 1) as usize]
    }

    /// Russian month name, as used in file titles
    pub fn month_name_ru(&self) -> &'static str {
        MONTH_NAMES_RU[(self.month - 1) as usize]
    }

    /// Short label for chart axes ("Jan", "Feb", ...)
    pub fn short_label(&self) -> &'static str {
        &MONTH_NAMES_EN[(self.month - 1) as usize][..3]
    }

    /// Human friendly label, e.g. "March 2025"
    pub fn friendly(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => {
                write!(f, "Invalid period '{}', expected YYYY-MM", s)
            }
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month number: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!(MonthPeriod::parse("2025-03").unwrap(), MonthPeriod { year: 2025, month: 3 });
        assert_eq!(MonthPeriod::parse("2025/11").unwrap(), MonthPeriod { year: 2025, month: 11 });
        assert_eq!(MonthPeriod::parse("07.2024").unwrap(), MonthPeriod { year: 2024, month: 7 });
        assert!(MonthPeriod::parse("2025").is_err());
        assert_eq!(
            MonthPeriod::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_navigation_wraps_years() {
        let jan = MonthPeriod::new(2025, 1).unwrap();
        assert_eq!(jan.prev(), MonthPeriod::new(2024, 12).unwrap());
        assert_eq!(jan.prev().next(), jan);
    }

    #[test]
    fn test_display_and_names() {
        let p = MonthPeriod::new(2025, 3).unwrap();
        assert_eq!(p.to_string(), "2025-03");
        assert_eq!(p.month_name_ru(), "Март");
        assert_eq!(p.short_label(), "Mar");
        assert_eq!(p.friendly(), "March 2025");
    }

    #[test]
    fn test_year_months() {
        let months: Vec<_> = MonthPeriod::year_months(2025).collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[11].month, 12);
    }
}
