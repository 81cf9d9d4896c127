//! Section heading vocabulary
//!
//! Plan and fact files use Russian level-2 headings. Matching is by
//! case-insensitive keyword, checked from the most specific section to the
//! least so that "Фактически оплаченные расходы" is not read as plain
//! expenses.

use crate::models::TableKind;

/// A section of a monthly file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Incomes,
    Expenses,
    Paid,
    Remaining,
}

/// Classification order matters: earlier entries win
const KEYWORDS: [(SectionKind, &[&str]); 4] = [
    (SectionKind::Paid, &["фактически оплаченные расходы", "оплаченные"]),
    (SectionKind::Remaining, &["оставшиеся платежи", "осталось"]),
    (
        SectionKind::Incomes,
        &["планируемые доходы", "фактические доходы", "доходы"],
    ),
    (
        SectionKind::Expenses,
        &["планируемые расходы", "фактические расходы", "расходы"],
    ),
];

impl SectionKind {
    /// Classify heading text
    pub fn classify(title: &str) -> Option<Self> {
        let title = title.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| title.contains(w)))
            .map(|(kind, _)| *kind)
    }

    /// Heading text used when a plan file section has to be created
    pub fn plan_title(&self) -> &'static str {
        match self {
            Self::Incomes => "Планируемые доходы",
            Self::Expenses => "Планируемые расходы",
            Self::Paid => "Фактически оплаченные расходы",
            Self::Remaining => "Оставшиеся платежи",
        }
    }

    /// Heading text used in fact files
    pub fn fact_title(&self) -> &'static str {
        match self {
            Self::Incomes => "Доходы",
            Self::Expenses => "Расходы",
            Self::Paid => "Оплаченные расходы",
            Self::Remaining => "Оставшиеся платежи",
        }
    }

    /// Default header columns for a new table in this section
    pub fn columns(&self) -> [&'static str; 4] {
        match self {
            Self::Incomes => ["Дата", "Источник дохода", "Сумма (руб.)", "Примечание"],
            Self::Expenses | Self::Remaining => {
                ["Категория", "Сумма (руб.)", "Срок оплаты", "Примечание"]
            }
            Self::Paid => ["Категория", "Сумма (руб.)", "Дата оплаты", "Примечание"],
        }
    }
}

impl From<TableKind> for SectionKind {
    fn from(kind: TableKind) -> Self {
        match kind {
            TableKind::Incomes => Self::Incomes,
            TableKind::Expenses => Self::Expenses,
            TableKind::Paid => Self::Paid,
            TableKind::Remaining => Self::Remaining,
        }
    }
}
