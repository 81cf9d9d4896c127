//! Plan and fact documents: parsing rows out and splicing rows in
//!
//! A [`LedgerDocument`] wraps the raw lines of one monthly file. Reads never
//! fail: a missing section simply yields no rows. Mutations locate their
//! section and table first and return a structure error before touching any
//! line when either is missing.

use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    clean_label, parse_amount, ExpenseRow, IncomeRow, LedgerKind, Money, MonthPeriod,
    MonthlyFact, MonthlyPlan, PaidExpenseRow, RowId,
};

use super::columns::ColumnMap;
use super::document::{format_header, format_row, Document, TableSpan};
use super::headings::SectionKind;
use super::template;

/// How to pick the planned expense that is being paid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelector {
    /// By position in the expenses table
    Position(usize),
    /// By position, following the row by value when it has moved. Refuses
    /// when the row is gone or is no longer unique.
    Checked {
        position: usize,
        category: String,
        amount: Money,
    },
    /// By value; fails when zero or several rows match
    Value { category: String, amount: Money },
}

impl RowSelector {
    /// Selector for a row shown in the UI
    pub fn checked(id: RowId, row: &ExpenseRow) -> Self {
        Self::Checked {
            position: id.position,
            category: row.clean_category(),
            amount: row.amount,
        }
    }
}

/// A parsed data row with its line index
struct LocatedRow {
    line: usize,
    values: [String; 4],
}

/// One monthly plan or fact file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDocument {
    kind: LedgerKind,
    doc: Document,
}

impl LedgerDocument {
    /// Wrap file text
    pub fn parse(kind: LedgerKind, text: &str) -> Self {
        Self {
            kind,
            doc: Document::parse(text),
        }
    }

    /// Skeleton document for a month without a file
    pub fn template(kind: LedgerKind, period: MonthPeriod) -> Self {
        Self::parse(kind, &template::render(kind, period))
    }

    pub fn kind(&self) -> LedgerKind {
        self.kind
    }

    /// Serialise back to markdown
    pub fn render(&self) -> String {
        self.doc.render()
    }

    /// Rows of a plan file
    pub fn plan(&self) -> MonthlyPlan {
        MonthlyPlan {
            incomes: self.incomes(),
            expenses: self.expense_rows(SectionKind::Expenses),
            paid_expenses: self
                .rows(SectionKind::Paid)
                .into_iter()
                .map(|r| {
                    let [category, amount, date_paid, note] = r.values;
                    PaidExpenseRow {
                        category,
                        amount: parse_amount(&amount),
                        date_paid,
                        note,
                    }
                })
                .collect(),
            remaining_expenses: self.expense_rows(SectionKind::Remaining),
        }
    }

    /// Rows of a fact file
    pub fn fact(&self) -> MonthlyFact {
        MonthlyFact {
            incomes: self.incomes(),
            expenses: self.expense_rows(SectionKind::Expenses),
        }
    }

    fn incomes(&self) -> Vec<IncomeRow> {
        self.rows(SectionKind::Incomes)
            .into_iter()
            .map(|r| {
                let [date, source, amount, note] = r.values;
                IncomeRow {
                    date,
                    source,
                    amount: parse_amount(&amount),
                    note,
                }
            })
            .collect()
    }

    fn expense_rows(&self, section: SectionKind) -> Vec<ExpenseRow> {
        self.rows(section)
            .into_iter()
            .map(|r| {
                let [category, amount, due_date, note] = r.values;
                ExpenseRow {
                    category,
                    amount: parse_amount(&amount),
                    due_date,
                    note,
                }
            })
            .collect()
    }

    /// Locate a section's table along with its column map
    fn table(&self, section: SectionKind) -> Option<(TableSpan, ColumnMap)> {
        let found = self.doc.section(section)?;
        let table = self.doc.table_in(&found)?;
        let columns = ColumnMap::from_header(section, &self.doc.cells(table.header));
        Some((table, columns))
    }

    /// Same as [`Self::table`] but reporting what is missing
    fn require_table(&self, section: SectionKind) -> DashboardResult<(TableSpan, ColumnMap)> {
        let title = template::section_title(self.kind, section);
        let found = self
            .doc
            .section(section)
            .ok_or_else(|| DashboardError::section_not_found(title))?;
        let table = self
            .doc
            .table_in(&found)
            .ok_or_else(|| DashboardError::table_not_found(title))?;
        let columns = ColumnMap::from_header(section, &self.doc.cells(table.header));
        Ok((table, columns))
    }

    fn rows(&self, section: SectionKind) -> Vec<LocatedRow> {
        let Some((table, columns)) = self.table(section) else {
            return Vec::new();
        };
        table
            .rows
            .iter()
            .map(|&line| LocatedRow {
                line,
                values: columns.read(&self.doc.cells(line)),
            })
            .collect()
    }

    /// Append a row to a section's table, before its total row if present
    fn insert_into(&mut self, section: SectionKind, values: [String; 4]) -> DashboardResult<usize> {
        let (table, columns) = self.require_table(section)?;
        let at = table.insertion_point();
        self.doc.insert_line(at, format_row(&columns.write(values)));
        debug!(line = at, ?section, "inserted table row");
        Ok(at)
    }

    /// Add an income row
    pub fn insert_income(&mut self, row: &IncomeRow) -> DashboardResult<()> {
        self.insert_into(SectionKind::Incomes, row.fields())
            .map(|_| ())
    }

    /// Add a planned (or actual) expense row
    pub fn insert_expense(&mut self, row: &ExpenseRow) -> DashboardResult<()> {
        self.insert_into(SectionKind::Expenses, row.fields())
            .map(|_| ())
    }

    /// Move a planned expense into the paid table
    ///
    /// The expense row is removed and an equivalent row dated `date_paid` is
    /// appended to the paid table. The paid section (or its table) is created
    /// when missing.
    pub fn mark_paid(
        &mut self,
        selector: &RowSelector,
        date_paid: &str,
        note: Option<String>,
    ) -> DashboardResult<PaidExpenseRow> {
        if self.kind != LedgerKind::Plan {
            return Err(DashboardError::Validation(
                "only plan files have a paid expenses table".into(),
            ));
        }

        self.require_table(SectionKind::Expenses)?;
        let candidates = self.rows(SectionKind::Expenses);
        let (line, expense) = select(&candidates, selector)?;

        let paid = PaidExpenseRow::from_expense(&expense, date_paid, note);
        self.doc.remove_line(line);
        self.append_paid(&paid);

        debug!(category = %paid.category, amount = %paid.amount, "moved expense to paid");
        Ok(paid)
    }

    fn append_paid(&mut self, paid: &PaidExpenseRow) {
        let values = paid.fields();

        if let Some((table, columns)) = self.table(SectionKind::Paid) {
            self.doc
                .insert_line(table.insertion_point(), format_row(&columns.write(values)));
            return;
        }

        let (header, separator) = format_header(&SectionKind::Paid.columns());
        let row = format_row(&ColumnMap::positional(4).write(values));

        match self.doc.section(SectionKind::Paid) {
            Some(section) => {
                // Section without a table: put one right under the heading
                let at = section.heading + 1;
                let mut block = vec![String::new(), header, separator, row];
                if self
                    .doc
                    .lines()
                    .get(at)
                    .is_some_and(|l| !l.trim().is_empty())
                {
                    block.push(String::new());
                }
                for (offset, line) in block.into_iter().enumerate() {
                    self.doc.insert_line(at + offset, line);
                }
            }
            None => {
                if self
                    .doc
                    .lines()
                    .last()
                    .is_some_and(|l| !l.trim().is_empty())
                {
                    self.doc.push_line("");
                }
                self.doc
                    .push_line(format!("## {}", SectionKind::Paid.plan_title()));
                self.doc.push_line("");
                self.doc.push_line(header);
                self.doc.push_line(separator);
                self.doc.push_line(row);
            }
        }
    }
}

/// Resolve a selector against the expense rows
fn select(rows: &[LocatedRow], selector: &RowSelector) -> DashboardResult<(usize, ExpenseRow)> {
    let to_expense = |r: &LocatedRow| ExpenseRow {
        category: r.values[0].clone(),
        amount: parse_amount(&r.values[1]),
        due_date: r.values[2].clone(),
        note: r.values[3].clone(),
    };

    match selector {
        RowSelector::Position(position) => {
            let row = by_position(rows, *position)?;
            Ok((row.line, to_expense(row)))
        }
        RowSelector::Checked {
            position,
            category,
            amount,
        } => {
            let matches = |r: &LocatedRow| {
                same_category(&r.values[0], category) && parse_amount(&r.values[1]) == *amount
            };
            if let Some(row) = by_position(rows, *position).ok().filter(|&r| matches(r)) {
                return Ok((row.line, to_expense(row)));
            }

            // Earlier moves shift later rows up; follow the row if it is unique
            let found: Vec<&LocatedRow> = rows.iter().filter(|&r| matches(r)).collect();
            match found.as_slice() {
                [row] => {
                    debug!(from = position, %category, "expense row moved, matched by value");
                    Ok((row.line, to_expense(row)))
                }
                [] => Err(DashboardError::Structure(format!(
                    "expense #{} '{}' {} is no longer in the plan; reload and try again",
                    position, category, amount
                ))),
                many => Err(DashboardError::Structure(format!(
                    "expense #{} moved and {} rows now match '{}' {}; reload and try again",
                    position,
                    many.len(),
                    category,
                    amount
                ))),
            }
        }
        RowSelector::Value { category, amount } => {
            let matches: Vec<&LocatedRow> = rows
                .iter()
                .filter(|r| same_category(&r.values[0], category) && parse_amount(&r.values[1]) == *amount)
                .collect();
            match matches.as_slice() {
                [] => Err(DashboardError::Structure(format!(
                    "no planned expense '{}' for {}",
                    category, amount
                ))),
                [row] => Ok((row.line, to_expense(row))),
                many => Err(DashboardError::Structure(format!(
                    "{} planned expenses match '{}' {}; pick one by row number",
                    many.len(),
                    category,
                    amount
                ))),
            }
        }
    }
}

fn by_position(rows: &[LocatedRow], position: usize) -> DashboardResult<&LocatedRow> {
    position
        .checked_sub(1)
        .and_then(|i| rows.get(i))
        .ok_or_else(|| {
            DashboardError::Structure(format!(
                "no planned expense #{} (table has {} rows)",
                position,
                rows.len()
            ))
        })
}

fn same_category(cell: &str, wanted: &str) -> bool {
    clean_label(cell).to_lowercase() == clean_label(wanted).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "\
# План на Март 2025

## Планируемые доходы

| Дата | Источник дохода | Сумма (руб.) | Примечание |
|------|-----------------|--------------|------------|
| 05.03.2025 | Работа | 60 000 | аванс |
| 20.03.2025 | Работа | 40 000 | |
| **Итого** | | **100 000** | |

## Планируемые расходы

| Категория | Сумма (руб.) | Срок оплаты | Примечание |
|-----------|--------------|-------------|------------|
| Аренда жилья | 25 000 | 01.03.2025 | |
| Транспорт | 1 500 | 10.03.2025 | проездной |
| **Кредит машина** | 12 000 | 15.03.2025 | |
| Транспорт | 1 500 | 25.03.2025 | такси |

## Оставшиеся платежи

| Категория | Сумма (руб.) | Срок оплаты | Примечание |
|---|---|---|---|
| Кредит машина | 12 000 | 15.03.2025 | |
";

    fn plan_doc() -> LedgerDocument {
        LedgerDocument::parse(LedgerKind::Plan, PLAN)
    }

    #[test]
    fn test_parse_plan() {
        let plan = plan_doc().plan();
        assert_eq!(plan.incomes.len(), 2);
        assert_eq!(plan.incomes[0].source, "Работа");
        assert_eq!(plan.incomes[0].note, "аванс");
        assert_eq!(plan.total_income(), Money::from_rubles(100_000));

        assert_eq!(plan.expenses.len(), 4);
        assert_eq!(plan.expenses[2].clean_category(), "Кредит машина");
        assert_eq!(plan.total_expenses(), Money::from_rubles(40_000));

        assert!(plan.paid_expenses.is_empty());
        assert_eq!(plan.remaining_expenses.len(), 1);
    }

    #[test]
    fn test_parse_fact() {
        let text = "## Доходы\n\n| Дата | Источник | Сумма |\n|---|---|---|\n| 01.03.2025 | Работа | 1 000,50 |\n\n## Расходы\n\n| Категория | Сумма | Дата |\n|---|---|---|\n| Продукты питания | 300 | 02.03.2025 |\n";
        let fact = LedgerDocument::parse(LedgerKind::Fact, text).fact();
        assert_eq!(fact.total_income(), Money::from_kopecks(100050));
        assert_eq!(fact.expenses[0].due_date, "02.03.2025");
    }

    #[test]
    fn test_insert_income_goes_before_total() {
        let mut doc = plan_doc();
        let row = IncomeRow {
            date: "25.03.2025".into(),
            source: "Фриланс".into(),
            amount: Money::from_rubles(5000),
            note: String::new(),
        };
        doc.insert_income(&row).unwrap();

        let rendered = doc.render();
        let lines: Vec<&str> = rendered.lines().collect();
        let total = lines.iter().position(|l| l.contains("**Итого**")).unwrap();
        assert_eq!(lines[total - 1], "| 25.03.2025 | Фриланс | 5 000 ₽ |  |");

        // Every original line survives in order once the new row is removed
        let mut without: Vec<&str> = lines.clone();
        without.remove(total - 1);
        assert_eq!(without, PLAN.lines().collect::<Vec<_>>());
    }

    #[test]
    fn test_insert_expense_appends_at_table_end_without_total() {
        let mut doc = plan_doc();
        let row = ExpenseRow {
            category: "Подарки".into(),
            amount: Money::from_rubles(3000),
            due_date: String::new(),
            note: "ДР".into(),
        };
        doc.insert_expense(&row).unwrap();

        let plan = doc.plan();
        assert_eq!(plan.expenses.len(), 5);
        assert_eq!(plan.expenses[4].category, "Подарки");
        assert_eq!(plan.expenses[4].note, "ДР");
        assert_eq!(plan.remaining_expenses.len(), 1);
    }

    #[test]
    fn test_insert_into_missing_section_fails_without_changes() {
        let mut doc = LedgerDocument::parse(LedgerKind::Plan, "# Пусто\n\nничего\n");
        let err = doc.insert_income(&IncomeRow::default()).unwrap_err();
        assert!(err.is_structure());
        assert_eq!(doc.render(), "# Пусто\n\nничего\n");
    }

    #[test]
    fn test_mark_paid_by_value_rejects_duplicates() {
        let mut doc = plan_doc();
        let selector = RowSelector::Value {
            category: "Транспорт".into(),
            amount: Money::from_rubles(1500),
        };
        let err = doc.mark_paid(&selector, "12.03.2025", None).unwrap_err();
        assert!(err.to_string().contains("2 planned expenses match"));
        assert_eq!(doc.render(), PLAN);
    }

    #[test]
    fn test_mark_paid_creates_paid_section() {
        let mut doc = plan_doc();
        let paid = doc
            .mark_paid(&RowSelector::Position(2), "12.03.2025", None)
            .unwrap();
        assert_eq!(paid.category, "Транспорт");
        assert_eq!(paid.note, "проездной");

        let plan = doc.plan();
        assert_eq!(plan.expenses.len(), 3);
        assert_eq!(
            plan.expenses
                .iter()
                .filter(|e| e.category == "Транспорт" && e.amount == Money::from_rubles(1500))
                .count(),
            1
        );
        assert_eq!(plan.paid_expenses.len(), 1);
        assert_eq!(plan.paid_expenses[0].date_paid, "12.03.2025");
        assert_eq!(plan.paid_expenses[0].amount, Money::from_rubles(1500));

        let rendered = doc.render();
        assert!(rendered.contains("\n\n## Фактически оплаченные расходы\n\n| Категория | Сумма (руб.) | Дата оплаты | Примечание |\n"));
        assert!(rendered.ends_with("| Транспорт | 1 500 ₽ | 12.03.2025 | проездной |\n"));
    }

    #[test]
    fn test_mark_paid_appends_to_existing_paid_table() {
        let text = format!(
            "{}\n## Фактически оплаченные расходы\n\n| Категория | Сумма (руб.) | Дата оплаты | Примечание |\n|---|---|---|---|\n| Аренда жилья | 25 000 | 01.03.2025 | |\n| Итого | 25 000 | | |\n",
            PLAN
        );
        let mut doc = LedgerDocument::parse(LedgerKind::Plan, &text);
        let selector = RowSelector::Value {
            category: "кредит машина".into(),
            amount: Money::from_rubles(12000),
        };
        doc.mark_paid(&selector, "15.03.2025", Some("вовремя".into()))
            .unwrap();

        let plan = doc.plan();
        assert_eq!(plan.paid_expenses.len(), 2);
        assert_eq!(plan.paid_expenses[1].category, "Кредит машина");
        assert_eq!(plan.paid_expenses[1].note, "вовремя");
        assert!(doc.render().contains("| Кредит машина | 12 000 ₽ | 15.03.2025 | вовремя |\n| Итого | 25 000 | | |"));
    }

    #[test]
    fn test_mark_paid_creates_table_under_bare_heading() {
        let text = format!("{}\n## Оплаченные\n\n## Заметки\n", PLAN);
        let mut doc = LedgerDocument::parse(LedgerKind::Plan, &text);
        doc.mark_paid(&RowSelector::Position(1), "01.03.2025", None)
            .unwrap();

        let plan = doc.plan();
        assert_eq!(plan.paid_expenses.len(), 1);
        assert_eq!(plan.paid_expenses[0].category, "Аренда жилья");
        assert!(doc.render().contains("## Оплаченные\n\n| Категория |"));
    }

    #[test]
    fn test_checked_selector_detects_shifted_rows() {
        let mut doc = plan_doc();
        let selector = RowSelector::Checked {
            position: 1,
            category: "Транспорт".into(),
            amount: Money::from_rubles(1500),
        };
        assert!(doc.mark_paid(&selector, "01.03.2025", None).is_err());

        let selector = RowSelector::Checked {
            position: 3,
            category: "Кредит машина".into(),
            amount: Money::from_rubles(12000),
        };
        assert!(doc.mark_paid(&selector, "01.03.2025", None).is_ok());
    }

    #[test]
    fn test_checked_selector_follows_moved_row() {
        let mut doc = plan_doc();
        doc.mark_paid(&RowSelector::Position(1), "01.03.2025", None)
            .unwrap();

        // "Кредит машина" was #3 when the list was shown and is #2 now
        let selector = RowSelector::Checked {
            position: 3,
            category: "Кредит машина".into(),
            amount: Money::from_rubles(12000),
        };
        let paid = doc.mark_paid(&selector, "02.03.2025", None).unwrap();
        assert_eq!(paid.category, "Кредит машина");
        let left: Vec<String> = doc.plan().expenses.iter().map(|e| e.note.clone()).collect();
        assert_eq!(left, vec!["проездной", "такси"]);
    }

    #[test]
    fn test_checked_selector_refuses_gone_row() {
        let mut doc = plan_doc();
        let selector = RowSelector::Checked {
            position: 1,
            category: "Аренда жилья".into(),
            amount: Money::from_rubles(25000),
        };
        doc.mark_paid(&selector, "01.03.2025", None).unwrap();

        let before = doc.render();
        let err = doc.mark_paid(&selector, "01.03.2025", None).unwrap_err();
        assert!(err.to_string().contains("no longer in the plan"));
        assert_eq!(doc.render(), before);
    }

    #[test]
    fn test_template_accepts_first_insert() {
        let period = MonthPeriod::new(2025, 4).unwrap();
        let mut doc = LedgerDocument::template(LedgerKind::Fact, period);
        doc.insert_expense(&ExpenseRow {
            category: "Транспорт".into(),
            amount: Money::from_rubles(100),
            due_date: "02.04.2025".into(),
            note: String::new(),
        })
        .unwrap();
        assert_eq!(doc.fact().expenses.len(), 1);
    }

    #[test]
    fn test_mark_paid_on_fact_is_rejected() {
        let period = MonthPeriod::new(2025, 4).unwrap();
        let mut doc = LedgerDocument::template(LedgerKind::Fact, period);
        assert!(doc
            .mark_paid(&RowSelector::Position(1), "01.04.2025", None)
            .is_err());
    }
}
