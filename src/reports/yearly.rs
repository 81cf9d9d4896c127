//! Yearly plan vs. fact report

use serde::Serialize;

use crate::models::{Money, MonthPeriod};
use crate::services::YearData;

/// Plan and fact totals of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub period: MonthPeriod,
    pub has_plan: bool,
    pub has_fact: bool,
    pub plan_income: Money,
    pub plan_expenses: Money,
    pub fact_income: Money,
    pub fact_expenses: Money,
}

impl MonthSummary {
    pub fn plan_balance(&self) -> Money {
        self.plan_income - self.plan_expenses
    }

    pub fn fact_balance(&self) -> Money {
        self.fact_income - self.fact_expenses
    }
}

/// Twelve-month comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyReport {
    pub year: i32,
    pub months: Vec<MonthSummary>,
    pub skipped: Vec<MonthPeriod>,
}

impl YearlyReport {
    pub fn generate(data: &YearData) -> Self {
        let months = data
            .months
            .iter()
            .map(|entry| {
                let plan = entry.data.plan.as_ref();
                let fact = entry.data.fact.as_ref();
                MonthSummary {
                    period: entry.period,
                    has_plan: plan.is_some(),
                    has_fact: fact.is_some(),
                    plan_income: plan.map(|p| p.total_income()).unwrap_or_default(),
                    plan_expenses: plan.map(|p| p.total_expenses()).unwrap_or_default(),
                    fact_income: fact.map(|f| f.total_income()).unwrap_or_default(),
                    fact_expenses: fact.map(|f| f.total_expenses()).unwrap_or_default(),
                }
            })
            .collect();

        Self {
            year: data.year,
            months,
            skipped: data.skipped.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn total_plan_income(&self) -> Money {
        self.months.iter().map(|m| m.plan_income).sum()
    }

    pub fn total_plan_expenses(&self) -> Money {
        self.months.iter().map(|m| m.plan_expenses).sum()
    }

    pub fn total_fact_income(&self) -> Money {
        self.months.iter().map(|m| m.fact_income).sum()
    }

    pub fn total_fact_expenses(&self) -> Money {
        self.months.iter().map(|m| m.fact_expenses).sum()
    }

    /// Largest single figure, for chart scaling
    pub fn max_amount(&self) -> Money {
        self.months
            .iter()
            .flat_map(|m| [m.plan_income, m.plan_expenses, m.fact_income, m.fact_expenses])
            .max()
            .unwrap_or_default()
    }
}
