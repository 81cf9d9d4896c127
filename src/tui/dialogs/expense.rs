//! Add-expense dialog
//!
//! The category field cycles through the default categories with Up/Down,
//! and typing replaces the pick with free text.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Style},
    text::Span,
    Frame,
};

use crate::models::{LedgerKind, DEFAULT_CATEGORIES};
use crate::services::NewExpense;
use crate::tui::app::{ActiveDialog, App};
use crate::tui::widgets::TextInput;

use super::income::kind_line;
use super::{edit_input, render_form, required_amount, FormRow};

/// Which field is focused in the expense dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    Kind,
    #[default]
    Category,
    Amount,
    Date,
    Note,
}

impl ExpenseField {
    const ORDER: [Self; 5] = [Self::Kind, Self::Category, Self::Amount, Self::Date, Self::Note];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// State for the expense dialog
#[derive(Debug, Clone, Default)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub kind: LedgerKind,
    pub category: TextInput,
    /// Index into the default categories, `None` once edited by hand
    pub category_index: Option<usize>,
    pub amount: TextInput,
    /// Due date for plans, spending date for facts
    pub date: TextInput,
    pub note: TextInput,
    pub error_message: Option<String>,
}

impl ExpenseFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh form with the first default category picked
    pub fn init(&mut self) {
        *self = Self {
            amount: TextInput::new().placeholder("0"),
            date: TextInput::new().placeholder("ДД.ММ.ГГГГ"),
            note: TextInput::new().placeholder("optional"),
            ..Self::default()
        };
        self.pick(0);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn pick(&mut self, index: usize) {
        self.category_index = Some(index);
        self.category.set(DEFAULT_CATEGORIES[index]);
    }

    /// Next default category, wrapping around
    pub fn next_category(&mut self) {
        let next = match self.category_index {
            Some(i) => (i + 1) % DEFAULT_CATEGORIES.len(),
            None => 0,
        };
        self.pick(next);
    }

    /// Previous default category, wrapping around
    pub fn prev_category(&mut self) {
        let prev = match self.category_index {
            Some(0) | None => DEFAULT_CATEGORIES.len() - 1,
            Some(i) => i - 1,
        };
        self.pick(prev);
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            LedgerKind::Plan => LedgerKind::Fact,
            LedgerKind::Fact => LedgerKind::Plan,
        };
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            ExpenseField::Kind => None,
            ExpenseField::Category => Some(&mut self.category),
            ExpenseField::Amount => Some(&mut self.amount),
            ExpenseField::Date => Some(&mut self.date),
            ExpenseField::Note => Some(&mut self.note),
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    /// Validate the form
    pub fn to_input(&self) -> Result<(LedgerKind, NewExpense), String> {
        let category = self.category.value().trim();
        if category.is_empty() {
            return Err("Category is required".to_string());
        }
        let amount = required_amount(&self.amount)?;

        Ok((
            self.kind,
            NewExpense {
                category: category.to_string(),
                amount,
                date: self.date.optional(),
                note: self.note.optional(),
            },
        ))
    }
}

/// Render the expense dialog
pub fn render(frame: &mut Frame, app: &App) {
    let state = &app.expense_form;
    let focused = state.focused_field;

    let mut category = state.category.line(focused == ExpenseField::Category);
    if let Some(i) = state.category_index {
        category.spans.push(Span::styled(
            format!("  {}/{}", i + 1, DEFAULT_CATEGORIES.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let date_label = match state.kind {
        LedgerKind::Plan => "Due date",
        LedgerKind::Fact => "Date",
    };

    let rows = vec![
        FormRow::new(
            "File",
            kind_line(state.kind, focused == ExpenseField::Kind),
            focused == ExpenseField::Kind,
        ),
        FormRow::new("Category", category, focused == ExpenseField::Category),
        FormRow::input("Amount", &state.amount, focused == ExpenseField::Amount),
        FormRow::input(date_label, &state.date, focused == ExpenseField::Date),
        FormRow::input("Note", &state.note, focused == ExpenseField::Note),
    ];

    render_form(
        frame,
        &app.theme,
        &format!("Add expense: {}", app.period.friendly()),
        60,
        rows,
        state.error_message.as_deref(),
        &[
            ("Enter", "Save"),
            ("Esc", "Cancel"),
            ("Tab", "Fields"),
            ("↑↓", "Category"),
        ],
    );
}

/// Handle key events for the expense dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.expense_form.reset();
            app.close_dialog();
            return true;
        }
        KeyCode::Enter => {
            save_expense(app);
            return true;
        }
        _ => {}
    }

    let form = &mut app.expense_form;
    match key.code {
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Down if form.focused_field == ExpenseField::Category => form.next_category(),
        KeyCode::Up if form.focused_field == ExpenseField::Category => form.prev_category(),
        KeyCode::Down => form.next_field(),
        KeyCode::Up => form.prev_field(),
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
            if form.focused_field == ExpenseField::Kind =>
        {
            form.toggle_kind()
        }
        _ => {
            let on_category = form.focused_field == ExpenseField::Category;
            let handled = form.focused_input().is_some_and(|input| edit_input(input, key));
            if !handled {
                return false;
            }
            if on_category {
                form.category_index = None;
            }
            form.error_message = None;
        }
    }
    true
}

fn save_expense(app: &mut App) {
    let (kind, input) = match app.expense_form.to_input() {
        Ok(parsed) => parsed,
        Err(msg) => {
            app.expense_form.set_error(msg);
            return;
        }
    };

    match app.add_expense(kind, input) {
        Ok(()) => {
            app.expense_form.reset();
            if app.active_dialog == ActiveDialog::AddExpense {
                app.close_dialog();
            }
        }
        Err(e) if e.is_missing_token() => app.handle_error(e),
        Err(e) => app.expense_form.set_error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_category_picker_wraps() {
        let mut form = ExpenseFormState::new();
        form.init();
        assert_eq!(form.category.value(), "Продукты питания");

        form.prev_category();
        assert_eq!(form.category.value(), "Другое");
        form.next_category();
        form.next_category();
        assert_eq!(form.category.value(), DEFAULT_CATEGORIES[1]);
    }

    #[test]
    fn test_typing_leaves_picker() {
        let mut form = ExpenseFormState::new();
        form.init();
        form.category.clear();
        for c in "Транспорт".chars() {
            form.category.insert(c);
        }
        form.category_index = None;

        form.amount.set("1500");
        let (kind, expense) = form.to_input().unwrap();
        assert_eq!(kind, LedgerKind::Plan);
        assert_eq!(expense.category, "Транспорт");
        assert_eq!(expense.amount, Money::from_rubles(1500));
        assert!(expense.date.is_none());

        form.next_category();
        assert_eq!(form.category.value(), DEFAULT_CATEGORIES[0]);
    }

    #[test]
    fn test_to_input_requires_amount() {
        let mut form = ExpenseFormState::new();
        form.init();
        form.amount.set("0");
        assert_eq!(
            form.to_input().unwrap_err(),
            "Amount must be greater than zero"
        );
    }
}
