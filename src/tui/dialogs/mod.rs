//! Dialog modules for the TUI
//!
//! Contains the modal forms and shared pieces for laying them out

pub mod expense;
pub mod help;
pub mod income;
pub mod mark_paid;
pub mod token;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::host::Theme;
use crate::models::{parse_amount, Money};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// One labelled row of a form
pub struct FormRow {
    pub label: String,
    pub value: Line<'static>,
    pub focused: bool,
}

impl FormRow {
    pub fn new(label: impl Into<String>, value: Line<'static>, focused: bool) -> Self {
        Self {
            label: label.into(),
            value,
            focused,
        }
    }

    pub fn input(label: impl Into<String>, input: &TextInput, focused: bool) -> Self {
        Self::new(label, input.line(focused), focused)
    }
}

/// Apply an editing key to a text input. Returns false for keys it ignores.
pub fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

/// Amount typed into a form; blank and zero are rejected
pub fn required_amount(input: &TextInput) -> Result<Money, String> {
    if input.value().trim().is_empty() {
        return Err("Amount is required".to_string());
    }
    let amount = parse_amount(input.value());
    if !amount.is_positive() {
        return Err("Amount must be greater than zero".to_string());
    }
    Ok(amount)
}

/// Draw a centered form: one label/value pair per row, then an error line
/// and key hints
pub fn render_form(
    frame: &mut Frame,
    theme: &Theme,
    title: &str,
    width: u16,
    rows: Vec<FormRow>,
    error: Option<&str>,
    hints: &[(&str, &str)],
) {
    let height = rows.len() as u16 * 2 + 5;
    let area = centered_rect_fixed(width, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(theme.link).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.link));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = rows
        .iter()
        .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Length(1)); // Error
    constraints.push(Constraint::Length(1)); // Hints
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let label_width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    let count = rows.len();
    for (i, row) in rows.into_iter().enumerate() {
        let label_style = if row.focused {
            Style::default().fg(theme.link).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let label = format!("{}:", row.label);
        let padding = " ".repeat(label_width.saturating_sub(label.chars().count()));

        let mut spans = vec![Span::styled(label, label_style), Span::raw(padding)];
        spans.extend(row.value.spans);
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[i * 2]);
    }

    if let Some(error) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
            chunks[count * 2],
        );
    }

    frame.render_widget(Paragraph::new(hint_line(hints)), chunks[count * 2 + 1]);
}

/// `[Enter] Save  [Esc] Cancel` style key hints
pub fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }
    Line::from(spans)
}

/// Centered popup area for dialogs that are not forms
pub fn popup(width: u16, height: u16, area: Rect) -> Rect {
    centered_rect_fixed(width, height, area)
}
