//! Chart renderer
//!
//! [`ChartRenderer`] owns the chart shown in each dashboard slot. `update`
//! replaces whatever instance the slot held; drawing reads the current one.

use std::collections::HashMap;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::display::report::{format_bar, format_percentage, left_align, truncate};
use crate::display::NO_DATA;
use crate::host::Theme;
use crate::models::Money;
use crate::reports::{CategoryShare, MonthDashboard, YearlyReport};

const INCOME_COLOR: Color = Color::Rgb(80, 220, 100);
const EXPENSE_COLOR: Color = Color::Rgb(230, 80, 80);
const PAID_COLOR: Color = Color::Rgb(90, 160, 240);

/// Palette cycled through for category slices
const SLICE_COLORS: [Color; 8] = [
    Color::Rgb(255, 99, 132),
    Color::Rgb(54, 162, 235),
    Color::Rgb(255, 206, 86),
    Color::Rgb(75, 192, 192),
    Color::Rgb(153, 102, 255),
    Color::Rgb(255, 159, 64),
    Color::Rgb(199, 199, 199),
    Color::Rgb(83, 102, 255),
];

/// Places a chart can be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    /// Income / expenses / paid bars
    Totals,
    /// Expense breakdown by category
    Categories,
    /// Analytics: monthly income and expense lines
    Monthly,
    /// Analytics: plan vs. fact grouped bars
    PlanVsFact,
}

impl ChartSlot {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Totals => "Totals",
            Self::Categories => "Expenses by category",
            Self::Monthly => "Income and expenses by month",
            Self::PlanVsFact => "Plan vs. fact expenses",
        }
    }
}

/// A labelled value
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: Money,
    pub color: Color,
}

/// A named series of values
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Money>,
    pub color: Color,
}

/// What a slot draws
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Bars(Vec<BarPoint>),
    Shares(Vec<CategoryShare>),
    Lines { labels: Vec<String>, series: Vec<Series> },
    Grouped { labels: Vec<String>, series: Vec<Series> },
}

impl ChartSpec {
    /// Nothing worth drawing
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bars(points) => points.is_empty(),
            Self::Shares(shares) => shares.is_empty(),
            Self::Lines { labels, .. } | Self::Grouped { labels, .. } => labels.is_empty(),
        }
    }
}

/// The chart currently held by a slot
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub spec: ChartSpec,
    /// Increases every time any slot is updated
    pub revision: u64,
}

/// Owner of all dashboard charts
#[derive(Debug, Default)]
pub struct ChartRenderer {
    slots: HashMap<ChartSlot, ChartInstance>,
    revisions: u64,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the chart in `slot`. An empty chart clears the slot.
    pub fn update(&mut self, slot: ChartSlot, spec: ChartSpec) {
        if spec.is_empty() {
            self.clear(slot);
            return;
        }
        self.revisions += 1;
        self.slots.insert(
            slot,
            ChartInstance {
                spec,
                revision: self.revisions,
            },
        );
    }

    pub fn clear(&mut self, slot: ChartSlot) {
        self.slots.remove(&slot);
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&ChartInstance> {
        self.slots.get(&slot)
    }

    /// Number of live chart instances
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Refresh the month charts. `paid` is the displayed paid total, which
    /// may include optimistic payments.
    pub fn update_month(&mut self, report: &MonthDashboard, paid: Money) {
        if report.plan.is_none() {
            self.clear(ChartSlot::Totals);
            self.clear(ChartSlot::Categories);
            return;
        }

        let totals = &report.totals;
        self.update(
            ChartSlot::Totals,
            ChartSpec::Bars(vec![
                BarPoint {
                    label: "Income".into(),
                    value: totals.income,
                    color: INCOME_COLOR,
                },
                BarPoint {
                    label: "Expenses".into(),
                    value: totals.expenses,
                    color: EXPENSE_COLOR,
                },
                BarPoint {
                    label: "Paid".into(),
                    value: paid,
                    color: PAID_COLOR,
                },
            ]),
        );
        self.update(ChartSlot::Categories, ChartSpec::Shares(report.breakdown.clone()));
    }

    /// Refresh the analytics charts
    pub fn update_year(&mut self, report: &YearlyReport) {
        let labels: Vec<String> = report
            .months
            .iter()
            .map(|m| m.period.short_label().to_string())
            .collect();

        let pick = |f: fn(&crate::reports::MonthSummary) -> Money| -> Vec<Money> {
            report.months.iter().map(f).collect()
        };

        self.update(
            ChartSlot::Monthly,
            ChartSpec::Lines {
                labels: labels.clone(),
                series: vec![
                    Series {
                        name: "Income".into(),
                        values: pick(|m| m.plan_income),
                        color: INCOME_COLOR,
                    },
                    Series {
                        name: "Expenses".into(),
                        values: pick(|m| m.plan_expenses),
                        color: EXPENSE_COLOR,
                    },
                ],
            },
        );
        self.update(
            ChartSlot::PlanVsFact,
            ChartSpec::Grouped {
                labels,
                series: vec![
                    Series {
                        name: "Plan".into(),
                        values: pick(|m| m.plan_expenses),
                        color: PAID_COLOR,
                    },
                    Series {
                        name: "Fact".into(),
                        values: pick(|m| m.fact_expenses),
                        color: EXPENSE_COLOR,
                    },
                ],
            },
        );
    }

    /// Draw the chart of `slot`, or a placeholder when it is empty
    pub fn render(&self, frame: &mut Frame, slot: ChartSlot, area: Rect, theme: &Theme, symbol: &str) {
        let block = Block::default()
            .title(format!(" {} ", slot.title()))
            .title_style(Style::default().fg(theme.link).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.hint));

        let Some(instance) = self.get(slot) else {
            frame.render_widget(
                Paragraph::new(Span::styled(NO_DATA, Style::default().fg(theme.hint))).block(block),
                area,
            );
            return;
        };

        match &instance.spec {
            ChartSpec::Bars(points) => render_bars(frame, area, block, points, symbol),
            ChartSpec::Shares(shares) => render_shares(frame, area, block, shares, theme, symbol),
            ChartSpec::Lines { labels, series } => render_lines(frame, area, block, labels, series, theme),
            ChartSpec::Grouped { labels, series } => render_grouped(frame, area, block, labels, series),
        }
    }
}

/// Bar heights in whole rubles
fn bar_value(value: Money) -> u64 {
    value.rubles().max(0) as u64
}

fn render_bars(frame: &mut Frame, area: Rect, block: Block, points: &[BarPoint], symbol: &str) {
    let bars: Vec<Bar> = points
        .iter()
        .map(|p| {
            Bar::default()
                .value(bar_value(p.value))
                .text_value(p.value.format_whole(symbol))
                .label(Line::from(p.label.clone()))
                .style(Style::default().fg(p.color))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let count = points.len().max(1) as u16;
    let bar_width = (inner_width / count).saturating_sub(2).clamp(3, 18);

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_shares(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    shares: &[CategoryShare],
    theme: &Theme,
    symbol: &str,
) {
    let label_width = shares
        .iter()
        .map(|s| s.category.chars().count().min(20))
        .max()
        .unwrap_or(0);
    let bar_width = (area.width as usize).saturating_sub(label_width + 24).clamp(4, 40);

    let lines: Vec<Line> = shares
        .iter()
        .enumerate()
        .map(|(i, share)| {
            let color = SLICE_COLORS[i % SLICE_COLORS.len()];
            Line::from(vec![
                Span::styled(
                    left_align(&truncate(&share.category, 20), label_width),
                    Style::default().fg(theme.text),
                ),
                Span::raw(" "),
                Span::styled(
                    format_bar(share.percentage, 100.0, bar_width),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {:>5} ", format_percentage(share.percentage)),
                    Style::default().fg(theme.hint),
                ),
                Span::raw(share.amount.format_whole(symbol)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_lines(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    labels: &[String],
    series: &[Series],
    theme: &Theme,
) {
    let points: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(|(x, v)| (x as f64, v.to_f64()))
                .collect()
        })
        .collect();

    let max = series
        .iter()
        .flat_map(|s| s.values.iter())
        .copied()
        .max()
        .unwrap_or_default()
        .to_f64()
        .max(1.0);

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(&points)
        .map(|(s, data)| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.color))
                .data(data)
        })
        .collect();

    let x_labels: Vec<Span> = match labels {
        [] => Vec::new(),
        [only] => vec![Span::raw(only.clone())],
        [first, .., last] => vec![Span::raw(first.clone()), Span::raw(last.clone())],
    };
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format_k(max / 2.0)),
        Span::raw(format_k(max)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.hint))
                .bounds([0.0, labels.len().saturating_sub(1).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.hint))
                .bounds([0.0, max * 1.1])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

fn render_grouped(frame: &mut Frame, area: Rect, block: Block, labels: &[String], series: &[Series]) {
    let groups: Vec<BarGroup> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let bars: Vec<Bar> = series
                .iter()
                .map(|s| {
                    let value = s.values.get(i).copied().unwrap_or_default();
                    Bar::default()
                        .value(bar_value(value))
                        .text_value(String::new())
                        .style(Style::default().fg(s.color))
                })
                .collect();
            BarGroup::default()
                .label(Line::from(label.clone()))
                .bars(&bars)
        })
        .collect();

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(2)
        .bar_gap(0)
        .group_gap(1);
    for group in &groups {
        chart = chart.data(group.clone());
    }
    frame.render_widget(chart, area);
}

/// Compact axis label: 1.2k, 35k, 1.4M
fn format_k(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 10_000.0 {
        format!("{:.0}k", value / 1000.0)
    } else if value >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else {
        format!("{:.0}", value)
    }
}
