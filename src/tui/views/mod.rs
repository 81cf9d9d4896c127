//! TUI Views module
//!
//! Contains the two main views, the month dashboard and yearly analytics,
//! plus the header and status bar around them.

pub mod analytics;
pub mod dashboard;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::{notification_rect, AppLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg).fg(app.theme.text)),
        frame.area(),
    );

    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, layout.main),
        ActiveView::Analytics => analytics::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }

    if let Some(notification) = app.notifications.current() {
        let area = notification_rect(44, 5, frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let subject = match app.active_view {
        ActiveView::Dashboard => format!(
            "{} · {}",
            app.period.friendly(),
            app.period.month_name_ru()
        ),
        ActiveView::Analytics => format!("Year {}", app.year),
    };

    let line = Line::from(vec![
        Span::styled(
            " findash ",
            Style::default()
                .fg(app.theme.button_text)
                .bg(app.theme.button)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            subject,
            Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.ledger.store().describe()),
            Style::default().fg(app.theme.hint),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::AddIncome => dialogs::income::render(frame, app),
        ActiveDialog::AddExpense => dialogs::expense::render(frame, app),
        ActiveDialog::MarkPaid(_) => dialogs::mark_paid::render(frame, app),
        ActiveDialog::Token => dialogs::token::render(frame, app),
        ActiveDialog::None => {}
    }
}
