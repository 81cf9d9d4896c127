//! Yearly analytics view
//!
//! Income/expense lines by month, plan vs. fact expense bars, and a month
//! by month table.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::display::NO_DATA;
use crate::models::Money;
use crate::tui::app::App;
use crate::tui::charts::ChartSlot;
use crate::tui::layout::AnalyticsLayout;

/// Render the analytics view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = AnalyticsLayout::new(area);
    let symbol = app.symbol();

    app.charts
        .render(frame, ChartSlot::Monthly, layout.monthly_chart, &app.theme, symbol);
    app.charts.render(
        frame,
        ChartSlot::PlanVsFact,
        layout.plan_vs_fact_chart,
        &app.theme,
        symbol,
    );

    render_table(frame, app, layout.table);
}

fn money_cell(amount: Money, present: bool, symbol: &str) -> Cell<'static> {
    if present {
        Cell::from(amount.format_whole(symbol))
    } else {
        Cell::from("—").style(Style::default().fg(Color::DarkGray))
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.year_report {
        Some(report) if !report.skipped.is_empty() => {
            format!(" {} ({} months not loaded) ", app.year, report.skipped.len())
        }
        _ => format!(" {} ", app.year),
    };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(app.theme.link).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.hint));

    let Some(report) = app.year_report.as_ref().filter(|r| !r.is_empty()) else {
        frame.render_widget(
            Paragraph::new(NO_DATA)
                .block(block)
                .style(Style::default().fg(app.theme.hint)),
            area,
        );
        return;
    };

    let symbol = app.symbol();
    let mut rows: Vec<Row> = report
        .months
        .iter()
        .map(|m| {
            let balance = m.plan_balance();
            let balance_style = if balance.is_negative() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(m.period.month_name()),
                money_cell(m.plan_income, m.has_plan, symbol),
                money_cell(m.plan_expenses, m.has_plan, symbol),
                money_cell(m.fact_income, m.has_fact, symbol),
                money_cell(m.fact_expenses, m.has_fact, symbol),
                money_cell(balance, m.has_plan, symbol).style(balance_style),
            ])
        })
        .collect();

    let plan_balance = report.total_plan_income() - report.total_plan_expenses();
    rows.push(
        Row::new(vec![
            Cell::from("Total"),
            Cell::from(report.total_plan_income().format_whole(symbol)),
            Cell::from(report.total_plan_expenses().format_whole(symbol)),
            Cell::from(report.total_fact_income().format_whole(symbol)),
            Cell::from(report.total_fact_expenses().format_whole(symbol)),
            Cell::from(plan_balance.format_whole(symbol)),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    let header = Row::new(vec![
        "Month",
        "Plan income",
        "Plan expenses",
        "Fact income",
        "Fact expenses",
        "Plan balance",
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Min(12),
    ];
    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
