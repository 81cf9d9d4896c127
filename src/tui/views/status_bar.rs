//! Status bar view
//!
//! Shows the host, token state, in-flight payments and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveView, App};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.host.name()),
        Style::default().fg(app.theme.hint),
    )];

    spans.push(Span::raw("│ "));
    if app.payments.has_pending() {
        spans.push(Span::styled(
            "saving… ",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(month) = &app.month {
        let label = if month.is_empty() {
            "no files".to_string()
        } else {
            format!(
                "plan {} · fact {}",
                if month.plan.is_some() { "✓" } else { "—" },
                if month.fact.is_some() { "✓" } else { "—" }
            )
        };
        spans.push(Span::styled(label, Style::default().fg(app.theme.text)));
        spans.push(Span::raw(" "));
    }

    let hints = match app.active_view {
        ActiveView::Dashboard => " ←/→:Month  i:Income  e:Expense  p:Paid  ?:Help  q:Quit ",
        ActiveView::Analytics => " ←/→:Year  Tab:Dashboard  ?:Help  q:Quit ",
    };

    // Character counts, not bytes: the bar contains box-drawing glyphs
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(app.theme.hint)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
