//! Ledger service
//!
//! Loads monthly plan and fact files and applies row edits through the
//! read, mutate, write cycle against a [`FileStore`].

use std::sync::Arc;

use crate::config::Settings;
use crate::error::{DashboardError, DashboardResult};
use crate::markdown::{LedgerDocument, RowSelector};
use crate::models::{
    ExpenseRow, IncomeRow, LedgerKind, Money, MonthPeriod, MonthlyFact, MonthlyPlan,
    PaidExpenseRow,
};
use crate::store::FileStore;

/// Plan and fact of one month, either of which may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthData {
    pub plan: Option<MonthlyPlan>,
    pub fact: Option<MonthlyFact>,
}

impl MonthData {
    /// Neither file exists
    pub fn is_empty(&self) -> bool {
        self.plan.is_none() && self.fact.is_none()
    }
}

/// Input for a new income row
#[derive(Debug, Clone, Default)]
pub struct NewIncome {
    /// Defaults to today
    pub date: Option<String>,
    pub source: String,
    pub amount: Money,
    pub note: Option<String>,
}

/// Input for a new expense row
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    pub category: String,
    pub amount: Money,
    /// Due date in plans, spending date in facts
    pub date: Option<String>,
    pub note: Option<String>,
}

/// Service for reading and editing monthly files
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn FileStore>,
    settings: Arc<Settings>,
}

impl LedgerService {
    /// Create a new ledger service
    pub fn new(store: Arc<dyn FileStore>, settings: Settings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn FileStore {
        self.store.as_ref()
    }

    /// Today's date in the configured format
    pub fn today(&self) -> String {
        chrono::Local::now()
            .date_naive()
            .format(&self.settings.date_format)
            .to_string()
    }

    fn load_document(
        &self,
        kind: LedgerKind,
        period: MonthPeriod,
    ) -> DashboardResult<Option<LedgerDocument>> {
        let path = self.settings.file_path(kind, period);
        Ok(self
            .store
            .read(&path)?
            .map(|text| LedgerDocument::parse(kind, &text)))
    }

    /// Load a month's plan, `None` when the file does not exist
    pub fn load_plan(&self, period: MonthPeriod) -> DashboardResult<Option<MonthlyPlan>> {
        Ok(self
            .load_document(LedgerKind::Plan, period)?
            .map(|doc| doc.plan()))
    }

    /// Load a month's fact, `None` when the file does not exist
    pub fn load_fact(&self, period: MonthPeriod) -> DashboardResult<Option<MonthlyFact>> {
        Ok(self
            .load_document(LedgerKind::Fact, period)?
            .map(|doc| doc.fact()))
    }

    /// Load plan and fact in parallel
    pub fn load_month(&self, period: MonthPeriod) -> DashboardResult<MonthData> {
        let (plan, fact) = std::thread::scope(|scope| {
            let plan = scope.spawn(|| self.load_plan(period));
            let fact = self.load_fact(period);
            (plan.join(), fact)
        });

        let plan = plan
            .map_err(|_| DashboardError::Storage(format!("plan read for {} panicked", period)))??;
        let fact = fact?;

        tracing::debug!(
            %period,
            plan = plan.is_some(),
            fact = fact.is_some(),
            "month loaded"
        );
        Ok(MonthData { plan, fact })
    }

    /// Append an income row to the month's plan or fact
    pub fn add_income(
        &self,
        kind: LedgerKind,
        period: MonthPeriod,
        input: NewIncome,
    ) -> DashboardResult<IncomeRow> {
        let source = input.source.trim().to_string();
        if source.is_empty() {
            return Err(DashboardError::Validation("Income source cannot be empty".into()));
        }
        require_positive(input.amount)?;

        let row = IncomeRow {
            date: non_empty(input.date).unwrap_or_else(|| self.today()),
            source,
            amount: input.amount,
            note: non_empty(input.note).unwrap_or_default(),
        };
        let message = format!("Added income: {} - {}", row.source, self.format(row.amount));

        self.edit(kind, period, &message, |doc| doc.insert_income(&row))?;
        Ok(row)
    }

    /// Append an expense row to the month's plan or fact
    pub fn add_expense(
        &self,
        kind: LedgerKind,
        period: MonthPeriod,
        input: NewExpense,
    ) -> DashboardResult<ExpenseRow> {
        let category = input.category.trim().to_string();
        if category.is_empty() {
            return Err(DashboardError::Validation("Category cannot be empty".into()));
        }
        require_positive(input.amount)?;

        // Fact rows record when the money was spent
        let date = match kind {
            LedgerKind::Plan => non_empty(input.date).unwrap_or_default(),
            LedgerKind::Fact => non_empty(input.date).unwrap_or_else(|| self.today()),
        };

        let row = ExpenseRow {
            category,
            amount: input.amount,
            due_date: date,
            note: non_empty(input.note).unwrap_or_default(),
        };
        let message = format!(
            "Added expense: {} - {}",
            row.category,
            self.format(row.amount)
        );

        self.edit(kind, period, &message, |doc| doc.insert_expense(&row))?;
        Ok(row)
    }

    /// Move a planned expense to the paid table of the month's plan
    pub fn mark_paid(
        &self,
        period: MonthPeriod,
        selector: &RowSelector,
        date_paid: Option<String>,
        note: Option<String>,
    ) -> DashboardResult<PaidExpenseRow> {
        self.store.ensure_writable()?;

        let path = self.settings.file_path(LedgerKind::Plan, period);
        let snapshot = self.store.read_for_update(&path)?.ok_or_else(|| {
            DashboardError::Structure(format!("no plan for {}", period.friendly()))
        })?;
        let mut doc = LedgerDocument::parse(LedgerKind::Plan, &snapshot.content);

        let date_paid = non_empty(date_paid).unwrap_or_else(|| self.today());
        let paid = doc.mark_paid(selector, &date_paid, non_empty(note))?;

        let message = format!(
            "Marked as paid: {} - {}",
            paid.category,
            self.format(paid.amount)
        );
        self.store
            .write(&path, &doc.render(), &message, Some(&snapshot.revision))?;

        tracing::info!(%period, category = %paid.category, amount = %paid.amount, "expense marked as paid");
        Ok(paid)
    }

    /// Read (or template) a file, apply `mutate`, and write it back at the
    /// revision that was read
    fn edit<F, T>(
        &self,
        kind: LedgerKind,
        period: MonthPeriod,
        message: &str,
        mutate: F,
    ) -> DashboardResult<T>
    where
        F: FnOnce(&mut LedgerDocument) -> DashboardResult<T>,
    {
        self.store.ensure_writable()?;

        let path = self.settings.file_path(kind, period);
        let snapshot = self.store.read_for_update(&path)?;
        let mut doc = match &snapshot {
            Some(snapshot) => LedgerDocument::parse(kind, &snapshot.content),
            None => {
                tracing::info!(%path, "file missing, starting from template");
                LedgerDocument::template(kind, period)
            }
        };

        let result = mutate(&mut doc)?;

        let revision = snapshot.as_ref().map(|s| s.revision.as_str());
        self.store.write(&path, &doc.render(), message, revision)?;
        Ok(result)
    }

    fn format(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.settings.currency_symbol)
    }
}

fn require_positive(amount: Money) -> DashboardResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(DashboardError::Validation(format!(
            "Amount must be positive, got {}",
            amount
        )))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::InterveningCommit;
    use crate::store::LocalStore;
    use tempfile::TempDir;

    fn service() -> (TempDir, LedgerService) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path());
        (temp_dir, LedgerService::new(Arc::new(store), Settings::default()))
    }

    fn march() -> MonthPeriod {
        MonthPeriod::new(2025, 3).unwrap()
    }

    const PLAN: &str = "# План на Март 2025\n\
\n\
## Планируемые доходы\n\
\n\
| Дата | Источник | Сумма (руб.) | Примечание |\n\
|------|----------|--------------|------------|\n\
| 05.03.2025 | Зарплата | 80 000 | |\n\
| **Итого** | | **80 000** | |\n\
\n\
## Планируемые расходы\n\
\n\
| Категория | Сумма (руб.) | Срок оплаты | Примечание |\n\
|-----------|--------------|-------------|------------|\n\
| Транспорт | 1 500 | 10.03.2025 | |\n\
| Аренда жилья | 30 000 | 01.03.2025 | |\n\
";

    fn seed(dir: &TempDir, service: &LedgerService, text: &str) {
        let path = service.settings().file_path(LedgerKind::Plan, march());
        let full = dir.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, text).unwrap();
    }

    #[test]
    fn test_missing_month_is_empty() {
        let (_dir, service) = service();
        let month = service.load_month(march()).unwrap();
        assert!(month.is_empty());
    }

    #[test]
    fn test_load_month_reads_plan() {
        let (dir, service) = service();
        seed(&dir, &service, PLAN);

        let month = service.load_month(march()).unwrap();
        let plan = month.plan.unwrap();
        assert!(month.fact.is_none());
        assert_eq!(plan.total_income(), Money::from_rubles(80000));
        assert_eq!(plan.expenses.len(), 2);
    }

    #[test]
    fn test_add_income_to_new_month_uses_template() {
        let (_dir, service) = service();
        let row = service
            .add_income(
                LedgerKind::Fact,
                march(),
                NewIncome {
                    date: Some("15.03.2025".into()),
                    source: "Фриланс".into(),
                    amount: Money::from_rubles(5000),
                    note: None,
                },
            )
            .unwrap();
        assert_eq!(row.source, "Фриланс");

        let fact = service.load_fact(march()).unwrap().unwrap();
        assert_eq!(fact.incomes, vec![row]);
    }

    #[test]
    fn test_add_expense_validates() {
        let (_dir, service) = service();
        let err = service
            .add_expense(
                LedgerKind::Plan,
                march(),
                NewExpense {
                    category: "Транспорт".into(),
                    amount: Money::zero(),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));

        let err = service
            .add_expense(
                LedgerKind::Plan,
                march(),
                NewExpense {
                    category: "  ".into(),
                    amount: Money::from_rubles(1),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
    }

    #[test]
    fn test_fact_expense_defaults_to_today() {
        let (_dir, service) = service();
        let row = service
            .add_expense(
                LedgerKind::Fact,
                march(),
                NewExpense {
                    category: "Продукты питания".into(),
                    amount: Money::from_rubles(2500),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(row.due_date, service.today());
    }

    #[test]
    fn test_mark_paid_moves_row() {
        let (dir, service) = service();
        seed(&dir, &service, PLAN);

        let selector = RowSelector::Value {
            category: "Транспорт".into(),
            amount: Money::from_rubles(1500),
        };
        let paid = service
            .mark_paid(march(), &selector, Some("09.03.2025".into()), None)
            .unwrap();
        assert_eq!(paid.date_paid, "09.03.2025");

        let plan = service.load_plan(march()).unwrap().unwrap();
        assert_eq!(plan.expenses.len(), 1);
        assert_eq!(plan.paid_expenses.len(), 1);
        assert_eq!(plan.paid_expenses[0].category, "Транспорт");
        assert_eq!(plan.total_paid(), Money::from_rubles(1500));
    }

    #[test]
    fn test_mark_paid_without_plan_is_structure_error() {
        let (_dir, service) = service();
        let err = service
            .mark_paid(march(), &RowSelector::Position(1), None, None)
            .unwrap_err();
        assert!(err.is_structure());
    }

    #[test]
    fn test_failed_mutation_leaves_file_untouched() {
        let (dir, service) = service();
        seed(&dir, &service, PLAN);

        let err = service
            .mark_paid(march(), &RowSelector::Position(9), None, None)
            .unwrap_err();
        assert!(err.is_structure());

        let path = service.settings().file_path(LedgerKind::Plan, march());
        assert_eq!(std::fs::read_to_string(dir.path().join(path)).unwrap(), PLAN);
    }

    fn add_gift(content: &str) -> String {
        content.replace(
            "| Аренда жилья | 30 000 | 01.03.2025 | |\n",
            "| Аренда жилья | 30 000 | 01.03.2025 | |\n| Подарки | 3 000 | 08.03.2025 | |\n",
        )
    }

    #[test]
    fn test_mark_paid_refuses_when_file_changed_after_read() {
        let dir = TempDir::new().unwrap();
        let store = InterveningCommit::new(LocalStore::new(dir.path()), add_gift);
        let service = LedgerService::new(Arc::new(store), Settings::default());
        seed(&dir, &service, PLAN);

        let err = service
            .mark_paid(march(), &RowSelector::Position(1), Some("09.03.2025".into()), None)
            .unwrap_err();
        assert_eq!(err.status(), Some(409));

        let plan = service.load_plan(march()).unwrap().unwrap();
        let categories: Vec<&str> = plan.expenses.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["Транспорт", "Аренда жилья", "Подарки"]);
        assert!(plan.paid_expenses.is_empty());
    }

    #[test]
    fn test_edit_refuses_when_file_changed_after_read() {
        let dir = TempDir::new().unwrap();
        let store = InterveningCommit::new(LocalStore::new(dir.path()), add_gift);
        let service = LedgerService::new(Arc::new(store), Settings::default());
        seed(&dir, &service, PLAN);

        let err = service
            .add_expense(
                LedgerKind::Plan,
                march(),
                NewExpense {
                    category: "Связь".into(),
                    amount: Money::from_rubles(700),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.status(), Some(409));

        let plan = service.load_plan(march()).unwrap().unwrap();
        assert_eq!(plan.expenses.len(), 3);
        assert!(plan.expenses.iter().all(|e| e.category != "Связь"));
    }

    #[test]
    fn test_checked_pays_back_to_back() {
        let (dir, service) = service();
        seed(&dir, &service, PLAN);

        let first = RowSelector::Checked {
            position: 1,
            category: "Транспорт".into(),
            amount: Money::from_rubles(1500),
        };
        let second = RowSelector::Checked {
            position: 2,
            category: "Аренда жилья".into(),
            amount: Money::from_rubles(30000),
        };
        service.mark_paid(march(), &first, None, None).unwrap();
        let paid = service.mark_paid(march(), &second, None, None).unwrap();
        assert_eq!(paid.category, "Аренда жилья");

        let plan = service.load_plan(march()).unwrap().unwrap();
        assert!(plan.expenses.is_empty());
        assert_eq!(plan.paid_expenses.len(), 2);
        assert_eq!(plan.total_paid(), Money::from_rubles(31500));
    }
}
