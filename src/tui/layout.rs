//! Layout definitions for the TUI
//!
//! Defines the overall layout structure: header, main panel, status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Title line with the period and repository
    pub header: Rect,
    /// Main content area
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            status_bar: vertical[2],
        }
    }
}

/// Layout for the month dashboard
pub struct DashboardLayout {
    /// Summary cards
    pub cards: Rect,
    pub totals_chart: Rect,
    pub categories_chart: Rect,
    pub incomes: Rect,
    pub expenses: Rect,
    pub remaining: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),      // Cards
                Constraint::Percentage(40), // Charts
                Constraint::Min(6),         // Tables
            ])
            .split(area);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        let tables = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(rows[2]);

        Self {
            cards: rows[0],
            totals_chart: charts[0],
            categories_chart: charts[1],
            incomes: tables[0],
            expenses: tables[1],
            remaining: tables[2],
        }
    }
}

/// Layout for the analytics view
pub struct AnalyticsLayout {
    pub monthly_chart: Rect,
    pub plan_vs_fact_chart: Rect,
    pub table: Rect,
}

impl AnalyticsLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Min(6)])
            .split(area);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        Self {
            monthly_chart: charts[0],
            plan_vs_fact_chart: charts[1],
            table: rows[1],
        }
    }
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Top-right corner box for notifications
pub fn notification_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(r.x + r.width - width, r.y + 1u16.min(r.height - height), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(20, 4, area);
        assert_eq!(rect, Rect::new(10, 3, 20, 4));

        let rect = centered_rect_fixed(80, 20, area);
        assert_eq!(rect, Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn test_notification_rect_fits() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = notification_rect(40, 4, area);
        assert_eq!(rect, Rect::new(60, 1, 40, 4));

        let tiny = Rect::new(0, 0, 10, 3);
        let rect = notification_rect(40, 4, tiny);
        assert_eq!(rect, Rect::new(0, 0, 10, 3));
    }
}
