//! Row records parsed from plan and fact files
//!
//! Everything here is rebuilt from markdown text on every load. Rows carry no
//! identity of their own; [`RowId`] addresses a row by its table and position.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Which table of a monthly file a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Incomes,
    Expenses,
    Paid,
    Remaining,
}

impl TableKind {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Incomes => "incomes",
            Self::Expenses => "expenses",
            Self::Paid => "paid",
            Self::Remaining => "remaining",
        }
    }
}

/// Which monthly file a write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    #[default]
    Plan,
    Fact,
}

impl LedgerKind {
    /// Directory name inside a year folder
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Plan => "Plans",
            Self::Fact => "Facts",
        }
    }

    /// File name prefix
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Plan => "Plan",
            Self::Fact => "Fact",
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => write!(f, "plan"),
            Self::Fact => write!(f, "fact"),
        }
    }
}

/// Stable address of a row: its table and 1-based position among data rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId {
    pub table: TableKind,
    pub position: usize,
}

impl RowId {
    pub fn new(table: TableKind, position: usize) -> Self {
        Self { table, position }
    }

    /// Address of a planned expense row
    pub fn expense(position: usize) -> Self {
        Self::new(TableKind::Expenses, position)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.table.label(), self.position)
    }
}

/// An income line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeRow {
    pub date: String,
    pub source: String,
    pub amount: Money,
    pub note: String,
}

impl IncomeRow {
    /// Field values in file column order
    pub fn fields(&self) -> [String; 4] {
        [
            self.date.clone(),
            self.source.clone(),
            self.amount.to_string(),
            self.note.clone(),
        ]
    }
}

/// A planned (or, in fact files, actual) expense line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub category: String,
    pub amount: Money,
    pub due_date: String,
    pub note: String,
}

impl ExpenseRow {
    /// Field values in file column order
    pub fn fields(&self) -> [String; 4] {
        [
            self.category.clone(),
            self.amount.to_string(),
            self.due_date.clone(),
            self.note.clone(),
        ]
    }

    /// Category with markdown bold markers removed
    pub fn clean_category(&self) -> String {
        clean_label(&self.category)
    }
}

/// An expense that has been moved to the paid table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaidExpenseRow {
    pub category: String,
    pub amount: Money,
    pub date_paid: String,
    pub note: String,
}

impl PaidExpenseRow {
    /// Build the paid counterpart of a planned expense
    pub fn from_expense(expense: &ExpenseRow, date_paid: impl Into<String>, note: Option<String>) -> Self {
        Self {
            category: expense.clean_category(),
            amount: expense.amount,
            date_paid: date_paid.into(),
            note: note.unwrap_or_else(|| expense.note.clone()),
        }
    }

    /// Field values in file column order
    pub fn fields(&self) -> [String; 4] {
        [
            self.category.clone(),
            self.amount.to_string(),
            self.date_paid.clone(),
            self.note.clone(),
        ]
    }
}

/// Strip markdown bold markers and surrounding whitespace
pub fn clean_label(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}

/// A month's plan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlyPlan {
    pub incomes: Vec<IncomeRow>,
    pub expenses: Vec<ExpenseRow>,
    pub paid_expenses: Vec<PaidExpenseRow>,
    pub remaining_expenses: Vec<ExpenseRow>,
}

impl MonthlyPlan {
    pub fn total_income(&self) -> Money {
        self.incomes.iter().map(|r| r.amount).sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|r| r.amount).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.paid_expenses.iter().map(|r| r.amount).sum()
    }

    pub fn total_remaining(&self) -> Money {
        self.remaining_expenses.iter().map(|r| r.amount).sum()
    }

    /// Look up a planned expense by its 1-based position
    pub fn expense_at(&self, position: usize) -> Option<&ExpenseRow> {
        position.checked_sub(1).and_then(|i| self.expenses.get(i))
    }
}

/// A month's actual figures
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlyFact {
    pub incomes: Vec<IncomeRow>,
    pub expenses: Vec<ExpenseRow>,
}

impl MonthlyFact {
    pub fn total_income(&self) -> Money {
        self.incomes.iter().map(|r| r.amount).sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|r| r.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(category: &str, rubles: i64) -> ExpenseRow {
        ExpenseRow {
            category: category.into(),
            amount: Money::from_rubles(rubles),
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_totals() {
        let plan = MonthlyPlan {
            incomes: vec![IncomeRow {
                amount: Money::from_rubles(50000),
                ..Default::default()
            }],
            expenses: vec![expense("Транспорт", 1500), expense("Аренда жилья", 20000)],
            ..Default::default()
        };
        assert_eq!(plan.total_income(), Money::from_rubles(50000));
        assert_eq!(plan.total_expenses(), Money::from_rubles(21500));
        assert!(plan.total_paid().is_zero());
    }

    #[test]
    fn test_expense_at_is_one_based() {
        let plan = MonthlyPlan {
            expenses: vec![expense("A", 1), expense("B", 2)],
            ..Default::default()
        };
        assert!(plan.expense_at(0).is_none());
        assert_eq!(plan.expense_at(2).unwrap().category, "B");
        assert!(plan.expense_at(3).is_none());
    }

    #[test]
    fn test_paid_row_from_expense_strips_bold() {
        let row = expense("**Кредит машина**", 12000);
        let paid = PaidExpenseRow::from_expense(&row, "05.03.2025", None);
        assert_eq!(paid.category, "Кредит машина");
        assert_eq!(paid.fields()[1], "12 000 ₽");
    }

    #[test]
    fn test_row_id_display() {
        assert_eq!(RowId::expense(3).to_string(), "expenses#3");
    }
}
