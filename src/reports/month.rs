//! Month dashboard report
//!
//! Totals and the expense breakdown for one month, computed from the loaded
//! plan and fact.

use std::io::Write;

use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    clean_label, ExpenseRow, Money, MonthPeriod, MonthlyFact, MonthlyPlan, RowId, TableKind,
};
use crate::services::MonthData;

/// Plan totals for a month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub income: Money,
    pub expenses: Money,
    pub paid: Money,
    pub remaining: Money,
    /// income - expenses
    pub balance: Money,
}

impl MonthTotals {
    pub fn from_plan(plan: &MonthlyPlan) -> Self {
        let income = plan.total_income();
        let expenses = plan.total_expenses();
        Self {
            income,
            expenses,
            paid: plan.total_paid(),
            remaining: plan.total_remaining(),
            balance: income - expenses,
        }
    }
}

/// Fact totals for a month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactTotals {
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
}

impl FactTotals {
    pub fn from_fact(fact: &MonthlyFact) -> Self {
        let income = fact.total_income();
        let expenses = fact.total_expenses();
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

/// One slice of the expense breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    /// Share of total planned expenses, 0-100
    pub percentage: f64,
}

/// Everything the month view shows
#[derive(Debug, Clone, Serialize)]
pub struct MonthDashboard {
    pub period: MonthPeriod,
    pub plan: Option<MonthlyPlan>,
    pub fact: Option<MonthlyFact>,
    pub totals: MonthTotals,
    pub fact_totals: Option<FactTotals>,
    pub breakdown: Vec<CategoryShare>,
}

impl MonthDashboard {
    /// Build the report for a loaded month
    pub fn generate(period: MonthPeriod, data: &MonthData) -> Self {
        let totals = data
            .plan
            .as_ref()
            .map(MonthTotals::from_plan)
            .unwrap_or_default();
        let breakdown = data
            .plan
            .as_ref()
            .map(|plan| expense_breakdown(&plan.expenses))
            .unwrap_or_default();

        Self {
            period,
            plan: data.plan.clone(),
            fact: data.fact.clone(),
            totals,
            fact_totals: data.fact.as_ref().map(FactTotals::from_fact),
            breakdown,
        }
    }

    /// Neither plan nor fact exists
    pub fn is_empty(&self) -> bool {
        self.plan.is_none() && self.fact.is_none()
    }

    /// Planned expenses worth showing, keyed by their position in the file
    pub fn expense_rows(&self) -> Vec<(RowId, &ExpenseRow)> {
        self.plan
            .as_ref()
            .map(|plan| visible_rows(TableKind::Expenses, &plan.expenses))
            .unwrap_or_default()
    }

    /// Remaining payments worth showing
    pub fn remaining_rows(&self) -> Vec<(RowId, &ExpenseRow)> {
        self.plan
            .as_ref()
            .map(|plan| visible_rows(TableKind::Remaining, &plan.remaining_expenses))
            .unwrap_or_default()
    }

    /// Export every row as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> DashboardResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let map_err = |e: csv::Error| DashboardError::Export(e.to_string());

        csv.write_record(["file", "table", "position", "date", "label", "amount", "note"])
            .map_err(map_err)?;

        let mut write = |file: &str,
                         table: TableKind,
                         position: usize,
                         date: &str,
                         label: &str,
                         amount: Money,
                         note: &str| {
            let position = position.to_string();
            let amount = format!("{:.2}", amount.to_f64());
            csv.write_record([
                file,
                table.label(),
                position.as_str(),
                date,
                label,
                amount.as_str(),
                note,
            ])
        };

        if let Some(plan) = &self.plan {
            for (i, row) in plan.incomes.iter().enumerate() {
                write("plan", TableKind::Incomes, i + 1, &row.date, &row.source, row.amount, &row.note)
                    .map_err(map_err)?;
            }
            for (i, row) in plan.expenses.iter().enumerate() {
                write("plan", TableKind::Expenses, i + 1, &row.due_date, &row.category, row.amount, &row.note)
                    .map_err(map_err)?;
            }
            for (i, row) in plan.paid_expenses.iter().enumerate() {
                write("plan", TableKind::Paid, i + 1, &row.date_paid, &row.category, row.amount, &row.note)
                    .map_err(map_err)?;
            }
            for (i, row) in plan.remaining_expenses.iter().enumerate() {
                write("plan", TableKind::Remaining, i + 1, &row.due_date, &row.category, row.amount, &row.note)
                    .map_err(map_err)?;
            }
        }
        if let Some(fact) = &self.fact {
            for (i, row) in fact.incomes.iter().enumerate() {
                write("fact", TableKind::Incomes, i + 1, &row.date, &row.source, row.amount, &row.note)
                    .map_err(map_err)?;
            }
            for (i, row) in fact.expenses.iter().enumerate() {
                write("fact", TableKind::Expenses, i + 1, &row.due_date, &row.category, row.amount, &row.note)
                    .map_err(map_err)?;
            }
        }

        csv.flush()
            .map_err(|e| DashboardError::Export(e.to_string()))?;
        Ok(())
    }

    /// Export the whole report as pretty JSON
    pub fn export_json<W: Write>(&self, writer: W) -> DashboardResult<()> {
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| DashboardError::Export(e.to_string()))
    }
}

fn visible_rows(table: TableKind, rows: &[ExpenseRow]) -> Vec<(RowId, &ExpenseRow)> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.amount.is_positive())
        .map(|(i, row)| (RowId::new(table, i + 1), row))
        .collect()
}

/// Group positive expenses by category in first-seen order
pub fn expense_breakdown(expenses: &[ExpenseRow]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();

    for row in expenses.iter().filter(|r| r.amount.is_positive()) {
        let category = clean_label(&row.category);
        match shares.iter_mut().find(|s| s.category == category) {
            Some(share) => share.amount += row.amount,
            None => shares.push(CategoryShare {
                category,
                amount: row.amount,
                percentage: 0.0,
            }),
        }
    }

    let total: Money = shares.iter().map(|s| s.amount).sum();
    if total.is_positive() {
        for share in &mut shares {
            share.percentage = share.amount.to_f64() / total.to_f64() * 100.0;
        }
    }
    shares
}
