//! Add-income dialog
//!
//! Appends an income row to the current month's plan or fact file.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

use crate::models::LedgerKind;
use crate::services::NewIncome;
use crate::tui::app::{ActiveDialog, App};
use crate::tui::widgets::TextInput;

use super::{edit_input, render_form, required_amount, FormRow};

/// Which field is focused in the income dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncomeField {
    Kind,
    Date,
    #[default]
    Source,
    Amount,
    Note,
}

impl IncomeField {
    const ORDER: [Self; 5] = [Self::Kind, Self::Date, Self::Source, Self::Amount, Self::Note];

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

/// State for the income dialog
#[derive(Debug, Clone, Default)]
pub struct IncomeFormState {
    pub focused_field: IncomeField,
    /// Plan or fact file
    pub kind: LedgerKind,
    pub date: TextInput,
    pub source: TextInput,
    pub amount: TextInput,
    pub note: TextInput,
    pub error_message: Option<String>,
}

impl IncomeFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh form dated today
    pub fn init(&mut self, today: &str) {
        *self = Self {
            date: TextInput::new().content(today),
            source: TextInput::new().placeholder("Зарплата"),
            amount: TextInput::new().placeholder("0"),
            note: TextInput::new().placeholder("optional"),
            ..Self::default()
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
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

    /// The focused text input; `None` while the file toggle is focused
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            IncomeField::Kind => None,
            IncomeField::Date => Some(&mut self.date),
            IncomeField::Source => Some(&mut self.source),
            IncomeField::Amount => Some(&mut self.amount),
            IncomeField::Note => Some(&mut self.note),
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    /// Validate the form
    pub fn to_input(&self) -> Result<(LedgerKind, NewIncome), String> {
        let source = self.source.value().trim();
        if source.is_empty() {
            return Err("Source is required".to_string());
        }
        let amount = required_amount(&self.amount)?;

        Ok((
            self.kind,
            NewIncome {
                date: self.date.optional(),
                source: source.to_string(),
                amount,
                note: self.note.optional(),
            },
        ))
    }
}

/// Plan / Fact switch shown as a form value
pub fn kind_line(kind: LedgerKind, focused: bool) -> Line<'static> {
    let option = |label: &'static str, selected: bool| {
        let style = if selected {
            Style::default().fg(Color::Black).bg(if focused {
                Color::Cyan
            } else {
                Color::Gray
            })
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {} ", label), style.add_modifier(Modifier::BOLD))
    };
    Line::from(vec![
        option("Plan", kind == LedgerKind::Plan),
        Span::raw(" "),
        option("Fact", kind == LedgerKind::Fact),
    ])
}

/// Render the income dialog
pub fn render(frame: &mut Frame, app: &App) {
    let state = &app.income_form;
    let focused = state.focused_field;

    let rows = vec![
        FormRow::new(
            "File",
            kind_line(state.kind, focused == IncomeField::Kind),
            focused == IncomeField::Kind,
        ),
        FormRow::input("Date", &state.date, focused == IncomeField::Date),
        FormRow::input("Source", &state.source, focused == IncomeField::Source),
        FormRow::input("Amount", &state.amount, focused == IncomeField::Amount),
        FormRow::input("Note", &state.note, focused == IncomeField::Note),
    ];

    render_form(
        frame,
        &app.theme,
        &format!("Add income: {}", app.period.friendly()),
        56,
        rows,
        state.error_message.as_deref(),
        &[("Enter", "Save"), ("Esc", "Cancel"), ("Tab", "Fields")],
    );
}

/// Handle key events for the income dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.income_form.reset();
            app.close_dialog();
            true
        }
        KeyCode::Tab | KeyCode::Down => {
            app.income_form.next_field();
            true
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.income_form.prev_field();
            true
        }
        KeyCode::Enter => {
            save_income(app);
            true
        }
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
            if app.income_form.focused_field == IncomeField::Kind =>
        {
            app.income_form.toggle_kind();
            true
        }
        _ => {
            let form = &mut app.income_form;
            let handled = form.focused_input().is_some_and(|input| edit_input(input, key));
            if handled {
                form.error_message = None;
            }
            handled
        }
    }
}

fn save_income(app: &mut App) {
    let (kind, input) = match app.income_form.to_input() {
        Ok(parsed) => parsed,
        Err(msg) => {
            app.income_form.set_error(msg);
            return;
        }
    };

    match app.add_income(kind, input) {
        Ok(()) => {
            app.income_form.reset();
            if app.active_dialog == ActiveDialog::AddIncome {
                app.close_dialog();
            }
        }
        Err(e) if e.is_missing_token() => app.handle_error(e),
        Err(e) => app.income_form.set_error(e.to_string()),
    }
}
