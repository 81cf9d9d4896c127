//! Month dashboard view
//!
//! Summary cards, the totals and category charts, and tables for incomes,
//! planned expenses and remaining payments.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::report::truncate;
use crate::display::NO_DATA;
use crate::models::{ExpenseRow, IncomeRow, Money, RowId};
use crate::services::PaymentState;
use crate::tui::app::App;
use crate::tui::charts::ChartSlot;
use crate::tui::layout::DashboardLayout;

/// Render the month dashboard
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = DashboardLayout::new(area);

    render_cards(frame, app, layout.cards);

    let symbol = app.symbol();
    app.charts
        .render(frame, ChartSlot::Totals, layout.totals_chart, &app.theme, symbol);
    app.charts.render(
        frame,
        ChartSlot::Categories,
        layout.categories_chart,
        &app.theme,
        symbol,
    );

    render_incomes(frame, app, layout.incomes);
    render_expenses(frame, app, layout.expenses);
    render_remaining(frame, app, layout.remaining);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.symbol();
    let totals = app.month.as_ref().map(|m| m.totals).unwrap_or_default();
    // Paid includes rows flagged optimistically; balance never does
    let paid = app.payments.displayed_paid();

    let cards = [
        ("Income", totals.income, Color::Green),
        ("Expenses", totals.expenses, Color::Red),
        ("Paid", paid, Color::Blue),
        ("Balance", totals.balance, balance_color(totals.balance)),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, amount, color), chunk) in cards.into_iter().zip(chunks.iter()) {
        let block = Block::default()
            .title(format!(" {} ", label))
            .title_style(Style::default().fg(app.theme.hint))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.hint));
        let value = Paragraph::new(Line::from(Span::styled(
            amount.format_whole(symbol),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(block);
        frame.render_widget(value, *chunk);
    }
}

fn balance_color(balance: Money) -> Color {
    if balance.is_negative() {
        Color::Red
    } else {
        Color::Green
    }
}

fn table_block<'a>(app: &App, title: &'a str, focused: bool) -> Block<'a> {
    let border = if focused { app.theme.link } else { app.theme.hint };
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(app.theme.link).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn header(cells: &[&'static str]) -> Row<'static> {
    Row::new(
        cells
            .iter()
            .map(|c| Cell::from(*c).style(Style::default().add_modifier(Modifier::BOLD)))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(Color::Yellow))
    .height(1)
}

fn no_data(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    frame.render_widget(
        Paragraph::new(NO_DATA)
            .block(block)
            .style(Style::default().fg(app.theme.hint)),
        area,
    );
}

fn render_incomes(frame: &mut Frame, app: &App, area: Rect) {
    let block = table_block(app, "Incomes", false);
    let incomes: &[IncomeRow] = app
        .month
        .as_ref()
        .and_then(|m| m.plan.as_ref())
        .map(|p| p.incomes.as_slice())
        .unwrap_or_default();

    if incomes.is_empty() {
        no_data(frame, app, block, area);
        return;
    }

    let symbol = app.symbol();
    let rows: Vec<Row> = incomes
        .iter()
        .map(|income| {
            Row::new(vec![
                Cell::from(income.date.clone()),
                Cell::from(truncate(&income.source, 18)),
                Cell::from(income.amount.format_whole(symbol))
                    .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(10),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header(&["Date", "Source", "Amount"]))
        .block(block);
    frame.render_widget(table, area);
}

fn expense_row(app: &App, id: RowId, expense: &ExpenseRow, symbol: &str) -> Row<'static> {
    let (marker, marker_color) = match app.payments.state(id) {
        Some(PaymentState::Pending) => ("…", Color::Yellow),
        Some(PaymentState::Committed) => ("✓", Color::Green),
        _ => ("", Color::Reset),
    };

    let mut row = Row::new(vec![
        Cell::from(id.position.to_string()),
        Cell::from(marker).style(Style::default().fg(marker_color)),
        Cell::from(truncate(&expense.clean_category(), 22)),
        Cell::from(expense.amount.format_whole(symbol)).style(Style::default().fg(Color::Red)),
        Cell::from(expense.due_date.clone()),
    ]);
    if app.payments.is_flagged(id) {
        row = row.style(Style::default().add_modifier(Modifier::DIM));
    }
    row
}

fn render_expenses(frame: &mut Frame, app: &App, area: Rect) {
    let block = table_block(app, "Expenses", true);
    let Some(month) = &app.month else {
        no_data(frame, app, block, area);
        return;
    };
    let expenses = month.expense_rows();
    if expenses.is_empty() {
        no_data(frame, app, block, area);
        return;
    }

    let symbol = app.symbol();
    let rows: Vec<Row> = expenses
        .iter()
        .map(|(id, expense)| expense_row(app, *id, expense, symbol))
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(12),
        Constraint::Length(12),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header(&["#", "", "Category", "Amount", "Due"]))
        .block(block)
        .highlight_style(
            Style::default()
                .bg(app.theme.secondary_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_remaining(frame: &mut Frame, app: &App, area: Rect) {
    let block = table_block(app, "Remaining", false);
    let remaining = app
        .month
        .as_ref()
        .map(|m| m.remaining_rows())
        .unwrap_or_default();
    if remaining.is_empty() {
        no_data(frame, app, block, area);
        return;
    }

    let symbol = app.symbol();
    let rows: Vec<Row> = remaining
        .iter()
        .map(|(_, expense)| {
            Row::new(vec![
                Cell::from(truncate(&expense.clean_category(), 20)),
                Cell::from(expense.amount.format_whole(symbol)),
            ])
        })
        .collect();

    let widths = [Constraint::Min(10), Constraint::Length(12)];
    let table = Table::new(rows, widths)
        .header(header(&["Category", "Amount"]))
        .block(block);
    frame.render_widget(table, area);
}
