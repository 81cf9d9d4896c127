//! Mark-as-paid confirmation
//!
//! Confirms the row, with an editable payment date (today by default) and an
//! optional note. On confirm the row is flagged at once and moved in the
//! background.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use crate::error::DashboardError;
use crate::models::{ExpenseRow, Money, RowId};
use crate::tui::app::App;
use crate::tui::widgets::{Notification, TextInput};

use super::{edit_input, render_form, FormRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkPaidField {
    #[default]
    Date,
    Note,
}

/// State for the mark-as-paid dialog
#[derive(Debug, Clone, Default)]
pub struct MarkPaidFormState {
    pub id: Option<RowId>,
    pub category: String,
    pub amount: Money,
    pub focused_field: MarkPaidField,
    pub date: TextInput,
    pub note: TextInput,
}

impl MarkPaidFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the dialog for a row
    pub fn init(&mut self, id: RowId, row: &ExpenseRow, today: &str) {
        *self = Self {
            id: Some(id),
            category: row.clean_category(),
            amount: row.amount,
            date: TextInput::new().content(today),
            note: TextInput::new().placeholder("optional").content(row.note.clone()),
            ..Self::default()
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_field(&mut self) {
        self.focused_field = match self.focused_field {
            MarkPaidField::Date => MarkPaidField::Note,
            MarkPaidField::Note => MarkPaidField::Date,
        };
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            MarkPaidField::Date => &mut self.date,
            MarkPaidField::Note => &mut self.note,
        }
    }
}

/// Render the mark-as-paid dialog
pub fn render(frame: &mut Frame, app: &App) {
    let state = &app.mark_paid_form;
    let symbol = app.symbol();

    let row = Line::from(vec![
        Span::styled(
            state.category.clone(),
            Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            state.amount.format_with_symbol(symbol),
            Style::default().fg(app.theme.link),
        ),
    ]);

    let rows = vec![
        FormRow::new("Expense", row, false),
        FormRow::input("Date paid", &state.date, state.focused_field == MarkPaidField::Date),
        FormRow::input("Note", &state.note, state.focused_field == MarkPaidField::Note),
    ];

    render_form(
        frame,
        &app.theme,
        "Mark as paid",
        56,
        rows,
        None,
        &[("Enter", "Mark paid"), ("Esc", "Cancel"), ("Tab", "Fields")],
    );
}

/// Handle key events for the mark-as-paid dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.mark_paid_form.reset();
            app.close_dialog();
            true
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.mark_paid_form.toggle_field();
            true
        }
        KeyCode::Enter => {
            confirm(app);
            true
        }
        _ => edit_input(app.mark_paid_form.focused_input(), key),
    }
}

fn confirm(app: &mut App) {
    let form = std::mem::take(&mut app.mark_paid_form);
    app.close_dialog();

    let Some(id) = form.id else {
        return;
    };

    match app.start_mark_paid(id, form.date.optional(), form.note.optional()) {
        Ok(()) => {}
        Err(DashboardError::Validation(msg)) => app.notify(Notification::warning(msg)),
        Err(e) => app.handle_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_prefills_row() {
        let row = ExpenseRow {
            category: "**Кредит**".into(),
            amount: Money::from_rubles(12000),
            due_date: "15.03.2025".into(),
            note: "ежемесячно".into(),
        };
        let mut form = MarkPaidFormState::new();
        form.init(RowId::expense(2), &row, "14.03.2025");

        assert_eq!(form.id, Some(RowId::expense(2)));
        assert_eq!(form.category, "Кредит");
        assert_eq!(form.date.value(), "14.03.2025");
        assert_eq!(form.note.optional().as_deref(), Some("ежемесячно"));

        form.toggle_field();
        assert_eq!(form.focused_field, MarkPaidField::Note);
        form.reset();
        assert!(form.id.is_none());
    }
}
