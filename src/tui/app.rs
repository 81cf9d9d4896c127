//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Reads happen on the UI thread; mark-as-paid moves run on worker threads
//! and report back through [`Event::Task`].

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crate::config::{Settings, Token, TokenStore};
use crate::error::{DashboardError, DashboardResult};
use crate::host::{HostShell, Theme};
use crate::markdown::RowSelector;
use crate::models::{ExpenseRow, LedgerKind, MonthPeriod, RowId};
use crate::reports::{MonthDashboard, YearlyReport};
use crate::services::{
    AnalyticsService, LedgerService, NewExpense, NewIncome, PaymentState, PaymentTracker,
};
use crate::store::open_store;

use super::charts::ChartRenderer;
use super::dialogs::expense::ExpenseFormState;
use super::dialogs::income::IncomeFormState;
use super::dialogs::mark_paid::MarkPaidFormState;
use super::dialogs::token::TokenFormState;
use super::event::{Event, TaskOutcome};
use super::widgets::{Notification, NotificationQueue};

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Analytics,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddIncome,
    AddExpense,
    MarkPaid(RowId),
    Token,
    Help,
}

/// Main application state
pub struct App {
    /// Reads and writes monthly files
    pub ledger: LedgerService,

    /// Local checkout used instead of GitHub, if any
    local: Option<PathBuf>,

    /// Where the access token is kept
    pub tokens: TokenStore,

    /// Host shell the dashboard runs in
    pub host: Box<dyn HostShell>,

    /// Colours resolved from the host once at startup
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    pub active_view: ActiveView,
    pub active_dialog: ActiveDialog,

    /// Month shown on the dashboard
    pub period: MonthPeriod,

    /// Year shown on the analytics view
    pub year: i32,

    /// Loaded month, `None` before the first load or after a failed one
    pub month: Option<MonthDashboard>,

    /// Loaded year for the analytics view
    pub year_report: Option<YearlyReport>,

    /// Index into the expense rows of the dashboard
    pub selected_row: usize,

    /// Optimistic payment states for the loaded month
    pub payments: PaymentTracker,

    pub notifications: NotificationQueue,
    pub charts: ChartRenderer,

    pub income_form: IncomeFormState,
    pub expense_form: ExpenseFormState,
    pub mark_paid_form: MarkPaidFormState,
    pub token_form: TokenFormState,

    /// Channel back into the event loop for worker threads
    tasks: mpsc::Sender<Event>,
}

impl App {
    /// Create a new App instance
    pub fn new(
        ledger: LedgerService,
        local: Option<PathBuf>,
        tokens: TokenStore,
        host: Box<dyn HostShell>,
        tasks: mpsc::Sender<Event>,
    ) -> Self {
        let period = MonthPeriod::current();
        let theme = host.theme();
        Self {
            ledger,
            local,
            tokens,
            host,
            theme,
            should_quit: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            period,
            year: period.year,
            month: None,
            year_report: None,
            selected_row: 0,
            payments: PaymentTracker::default(),
            notifications: NotificationQueue::new(),
            charts: ChartRenderer::new(),
            income_form: IncomeFormState::new(),
            expense_form: ExpenseFormState::new(),
            mark_paid_form: MarkPaidFormState::new(),
            token_form: TokenFormState::new(),
            tasks,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.ledger.settings()
    }

    pub fn symbol(&self) -> &str {
        &self.ledger.settings().currency_symbol
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Reload the dashboard month from the store
    pub fn reload_month(&mut self) {
        match self.ledger.load_month(self.period) {
            Ok(data) => {
                let report = MonthDashboard::generate(self.period, &data);
                self.payments.reset(report.totals.paid);
                self.charts.update_month(&report, self.payments.displayed_paid());
                let rows = report.expense_rows().len();
                self.selected_row = self.selected_row.min(rows.saturating_sub(1));
                self.month = Some(report);
            }
            Err(e) => {
                self.month = None;
                self.payments.reset(Default::default());
                let empty = MonthDashboard::generate(self.period, &Default::default());
                self.charts.update_month(&empty, Default::default());
                self.handle_error(e);
            }
        }
    }

    /// Load the analytics year from the store
    pub fn load_year(&mut self) {
        match AnalyticsService::new(&self.ledger).load_year(self.year) {
            Ok(data) => {
                let report = YearlyReport::generate(&data);
                self.charts.update_year(&report);
                if !report.skipped.is_empty() {
                    let months: Vec<&str> =
                        report.skipped.iter().map(|p| p.short_label()).collect();
                    self.notify(Notification::warning(format!(
                        "Could not load: {}",
                        months.join(", ")
                    )));
                }
                self.year_report = Some(report);
            }
            Err(e) => {
                self.year_report = None;
                self.handle_error(e);
            }
        }
    }

    /// Reload whatever the active view shows
    pub fn reload(&mut self) {
        match self.active_view {
            ActiveView::Dashboard => self.reload_month(),
            ActiveView::Analytics => self.load_year(),
        }
    }

    /// Switch between the dashboard and analytics
    pub fn switch_view(&mut self) {
        self.active_view = match self.active_view {
            ActiveView::Dashboard => ActiveView::Analytics,
            ActiveView::Analytics => ActiveView::Dashboard,
        };
        if self.active_view == ActiveView::Analytics
            && self.year_report.as_ref().map(|r| r.year) != Some(self.year)
        {
            self.load_year();
        }
    }

    /// Go to the previous month or year
    pub fn prev_period(&mut self) {
        match self.active_view {
            ActiveView::Dashboard => {
                self.period = self.period.prev();
                self.selected_row = 0;
                self.reload_month();
            }
            ActiveView::Analytics => {
                self.year -= 1;
                self.load_year();
            }
        }
    }

    /// Go to the next month or year
    pub fn next_period(&mut self) {
        match self.active_view {
            ActiveView::Dashboard => {
                self.period = self.period.next();
                self.selected_row = 0;
                self.reload_month();
            }
            ActiveView::Analytics => {
                self.year += 1;
                self.load_year();
            }
        }
    }

    /// Planned expenses with an amount, as listed on the dashboard
    pub fn expense_rows(&self) -> Vec<(RowId, ExpenseRow)> {
        self.month
            .as_ref()
            .map(|m| {
                m.expense_rows()
                    .into_iter()
                    .map(|(id, row)| (id, row.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn selected_expense(&self) -> Option<(RowId, ExpenseRow)> {
        self.expense_rows().into_iter().nth(self.selected_row)
    }

    /// Move selection up in the expenses table
    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Move selection down in the expenses table
    pub fn move_down(&mut self) {
        let max = self.expense_rows().len();
        if self.selected_row < max.saturating_sub(1) {
            self.selected_row += 1;
        }
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        let today = self.ledger.today();
        match dialog {
            ActiveDialog::AddIncome => self.income_form.init(&today),
            ActiveDialog::AddExpense => self.expense_form.init(),
            ActiveDialog::MarkPaid(id) => {
                let Some(row) = self.row(id) else {
                    self.notify(Notification::warning("That row is no longer in the plan"));
                    return;
                };
                self.mark_paid_form.init(id, &row, &today);
            }
            ActiveDialog::Token => {
                let status = self.token_status();
                self.token_form.init(status);
            }
            ActiveDialog::Help | ActiveDialog::None => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    fn row(&self, id: RowId) -> Option<ExpenseRow> {
        self.month
            .as_ref()
            .and_then(|m| m.plan.as_ref())
            .and_then(|plan| plan.expense_at(id.position))
            .cloned()
    }

    /// Open the mark-as-paid dialog for the selected row
    pub fn request_mark_paid(&mut self) {
        let Some((id, _)) = self.selected_expense() else {
            self.notify(Notification::info("No expense selected"));
            return;
        };
        if self.payments.is_flagged(id) {
            self.notify(Notification::warning("This expense is already marked as paid"));
            return;
        }
        self.open_dialog(ActiveDialog::MarkPaid(id));
    }

    /// Flag a row as paid and start the remote move on a worker thread
    pub fn start_mark_paid(
        &mut self,
        id: RowId,
        date_paid: Option<String>,
        note: Option<String>,
    ) -> DashboardResult<()> {
        let row = self
            .row(id)
            .ok_or_else(|| DashboardError::Structure(format!("no planned expense at {}", id)))?;
        self.payments.begin(id, row.amount)?;
        self.refresh_month_charts();

        let selector = RowSelector::checked(id, &row);
        let ledger = self.ledger.clone();
        let sender = self.tasks.clone();
        let period = self.period;

        thread::spawn(move || {
            let result = ledger.mark_paid(period, &selector, date_paid, note);
            if sender
                .send(Event::Task(TaskOutcome::MarkPaid { period, id, result }))
                .is_err()
            {
                tracing::warn!(%period, %id, "dashboard closed before mark-as-paid finished");
            }
        });
        Ok(())
    }

    /// Apply the result of a worker thread
    pub fn apply_task(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::MarkPaid { period, id, result } => {
                // A reload or period change drops row states
                let tracked = period == self.period
                    && self.payments.state(id) == Some(PaymentState::Pending);

                match result {
                    Ok(paid) => {
                        if tracked {
                            if let Err(e) = self.payments.commit(id) {
                                tracing::warn!(error = %e, "payment commit out of order");
                            }
                        }
                        self.notify(Notification::success(format!(
                            "Marked as paid: {} - {}",
                            paid.category,
                            paid.amount.format_with_symbol(self.symbol())
                        )));
                        if period == self.period && !self.payments.has_pending() {
                            self.reload_month();
                        } else {
                            self.refresh_month_charts();
                        }
                    }
                    Err(e) => {
                        if tracked {
                            if let Err(e) = self.payments.rollback(id) {
                                tracing::warn!(error = %e, "payment rollback out of order");
                            }
                        }
                        self.refresh_month_charts();
                        self.handle_error(e);
                    }
                }
            }
        }
    }

    fn refresh_month_charts(&mut self) {
        if let Some(report) = &self.month {
            self.charts.update_month(report, self.payments.displayed_paid());
        }
    }

    /// Append an income row, then reload
    pub fn add_income(&mut self, kind: LedgerKind, input: NewIncome) -> DashboardResult<()> {
        let row = self.ledger.add_income(kind, self.period, input)?;
        self.notify(Notification::success(format!(
            "Added income: {} - {}",
            row.source,
            row.amount.format_with_symbol(self.symbol())
        )));
        self.reload_month();
        Ok(())
    }

    /// Append an expense row, then reload
    pub fn add_expense(&mut self, kind: LedgerKind, input: NewExpense) -> DashboardResult<()> {
        let row = self.ledger.add_expense(kind, self.period, input)?;
        self.notify(Notification::success(format!(
            "Added expense: {} - {}",
            row.category,
            row.amount.format_with_symbol(self.symbol())
        )));
        self.reload_month();
        Ok(())
    }

    /// Show a notification with matching haptic feedback
    pub fn notify(&mut self, notification: Notification) {
        self.host.haptic(notification.kind.haptic());
        self.notifications.push(notification);
    }

    /// Surface an error. A missing token opens the token dialog.
    pub fn handle_error(&mut self, error: DashboardError) {
        tracing::warn!(error = %error, "operation failed");
        if error.is_missing_token() {
            self.open_dialog(ActiveDialog::Token);
            self.notify(Notification::warning(
                "A GitHub token is needed to save changes",
            ));
            return;
        }

        if self.host.is_embedded() {
            self.host.alert(&error.to_string());
            self.drain_alerts();
        } else {
            self.notify(Notification::error(error.to_string()));
        }
    }

    /// Turn alerts queued by the host into notifications
    pub fn drain_alerts(&mut self) {
        for alert in self.host.take_alerts() {
            self.notify(Notification::error(alert));
        }
    }

    /// Periodic housekeeping
    pub fn on_tick(&mut self) {
        self.notifications.remove_expired();
        self.drain_alerts();
    }

    /// Active token, masked, with where it came from
    pub fn token_status(&self) -> Option<String> {
        match self.tokens.load() {
            Ok(Some((token, source))) => Some(format!("{} ({})", token.masked(), source)),
            Ok(None) => None,
            Err(e) => Some(format!("unreadable: {}", e)),
        }
    }

    /// Validate and save a token, then reconnect with it
    pub fn save_token(&mut self, raw: &str) -> DashboardResult<()> {
        let token = Token::new(raw)?;
        self.tokens.save(&token)?;
        self.rebuild_store()?;
        self.notify(Notification::success("Token saved"));
        Ok(())
    }

    /// Remove the stored token, then reconnect without it
    pub fn clear_token(&mut self) -> DashboardResult<bool> {
        let removed = self.tokens.clear()?;
        self.rebuild_store()?;
        if removed {
            self.notify(Notification::info("Token removed"));
        }
        Ok(removed)
    }

    fn rebuild_store(&mut self) -> DashboardResult<()> {
        let token = self.tokens.token()?;
        let settings = self.ledger.settings().clone();
        let store = open_store(&settings, self.local.as_deref(), token);
        self.ledger = LedgerService::new(store, settings);
        Ok(())
    }
}
