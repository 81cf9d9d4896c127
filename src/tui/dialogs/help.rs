//! Help dialog
//!
//! Shows the keyboard shortcuts of the active view

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};

use super::popup;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let help_lines = help_lines(app.active_view);
    let area = popup(52, help_lines.len() as u16 + 2, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(app.theme.link).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.link));

    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("Tab", "Dashboard / analytics"),
        key_line("r", "Reload"),
        key_line("t", "GitHub token"),
        Line::from(""),
    ];

    match view {
        ActiveView::Dashboard => {
            lines.push(section("Dashboard"));
            lines.push(key_line("h/l ←/→", "Previous/next month"));
            lines.push(key_line("j/k ↓/↑", "Select expense"));
            lines.push(key_line("Enter/p", "Mark expense as paid"));
            lines.push(key_line("i", "Add income"));
            lines.push(key_line("e", "Add expense"));
        }
        ActiveView::Analytics => {
            lines.push(section("Analytics"));
            lines.push(key_line("h/l ←/→", "Previous/next year"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow),
    ))
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>10}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
