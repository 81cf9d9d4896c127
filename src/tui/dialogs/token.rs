//! Token settings dialog
//!
//! Enter a GitHub personal access token (masked), or remove the stored one.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

use crate::tui::app::{ActiveDialog, App};
use crate::tui::widgets::TextInput;

use super::{edit_input, render_form, FormRow};

/// State for the token dialog
#[derive(Debug, Clone, Default)]
pub struct TokenFormState {
    pub input: TextInput,
    /// Masked description of the active token
    pub status: Option<String>,
    pub error_message: Option<String>,
}

impl TokenFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, status: Option<String>) {
        *self = Self {
            input: TextInput::new().masked().placeholder("ghp_..."),
            status,
            error_message: None,
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the token dialog
pub fn render(frame: &mut Frame, app: &App) {
    let state = &app.token_form;

    let status = match &state.status {
        Some(status) => Line::from(Span::styled(status.clone(), Style::default().fg(Color::Green))),
        None => Line::from(Span::styled("not set", Style::default().fg(Color::DarkGray))),
    };

    let rows = vec![
        FormRow::new("Current", status, false),
        FormRow::input("New token", &state.input, true),
    ];

    let mut hints = vec![("Enter", "Save"), ("Esc", "Cancel")];
    if state.status.is_some() && state.input.is_empty() {
        hints.push(("Del", "Remove"));
    }

    render_form(
        frame,
        &app.theme,
        "GitHub token",
        60,
        rows,
        state.error_message.as_deref(),
        &hints,
    );
}

/// Handle key events for the token dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.token_form.reset();
            app.close_dialog();
            true
        }
        KeyCode::Enter => {
            let raw = app.token_form.input.value().to_string();
            match app.save_token(&raw) {
                Ok(()) => {
                    app.token_form.reset();
                    if app.active_dialog == ActiveDialog::Token {
                        app.close_dialog();
                    }
                }
                Err(e) => app.token_form.set_error(e.to_string()),
            }
            true
        }
        KeyCode::Delete if app.token_form.input.is_empty() => {
            match app.clear_token() {
                Ok(_) => {
                    let status = app.token_status();
                    app.token_form.init(status);
                }
                Err(e) => app.token_form.set_error(e.to_string()),
            }
            true
        }
        _ => {
            let handled = edit_input(&mut app.token_form.input, key);
            if handled {
                app.token_form.error_message = None;
            }
            handled
        }
    }
}
