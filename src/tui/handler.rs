//! Event handler for the TUI
//!
//! Routes keyboard events to the active dialog or the active view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return;
    }

    handle_normal_key(app, key);
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        // Any key closes help
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::AddIncome => {
            dialogs::income::handle_key(app, key);
        }
        ActiveDialog::AddExpense => {
            dialogs::expense::handle_key(app, key);
        }
        ActiveDialog::MarkPaid(_) => {
            dialogs::mark_paid::handle_key(app, key);
        }
        ActiveDialog::Token => {
            dialogs::token::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    // Global keys (work everywhere)
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Tab => app.switch_view(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('t') => app.open_dialog(ActiveDialog::Token),
        KeyCode::Char('h') | KeyCode::Left => app.prev_period(),
        KeyCode::Char('l') | KeyCode::Right => app.next_period(),
        _ if app.active_view == ActiveView::Dashboard => handle_dashboard_key(app, key),
        _ => {}
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Enter | KeyCode::Char('p') => app.request_mark_paid(),
        KeyCode::Char('i') => app.open_dialog(ActiveDialog::AddIncome),
        KeyCode::Char('e') => app.open_dialog(ActiveDialog::AddExpense),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DashboardPaths, Settings, TokenStore};
    use crate::host::StandaloneHost;
    use crate::services::LedgerService;
    use crate::store::LocalStore;
    use std::sync::{mpsc, Arc};
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let store = Arc::new(LocalStore::new(dir.path()));
        let paths = DashboardPaths::with_base_dir(dir.path().join("data"));
        let (sender, _receiver) = mpsc::channel();
        App::new(
            LedgerService::new(store, Settings::default()),
            None,
            TokenStore::file_only(&paths),
            Box::new(StandaloneHost),
            sender,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app(&dir);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.active_dialog, ActiveDialog::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.active_dialog, ActiveDialog::None);
    }

    #[test]
    fn test_period_navigation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let start = app.period;
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.period, start.next());
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.period, start.prev());
        assert!(app.month.as_ref().unwrap().is_empty());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_view, ActiveView::Analytics);
        let year = app.year;
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.year, year - 1);
    }

    #[test]
    fn test_income_dialog_typing() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.active_dialog, ActiveDialog::AddIncome);

        // Letters go to the form, not to the global keymap
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.income_form.source.value(), "q");

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.income_form.error_message.as_deref(),
            Some("Amount is required")
        );

        press(&mut app, KeyCode::Esc);
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_mark_paid_without_rows() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.reload_month();
        press(&mut app, KeyCode::Char('p'));
        assert!(!app.has_dialog());
        assert_eq!(
            app.notifications.current().unwrap().message,
            "No expense selected"
        );
    }
}
