//! Skeleton files for months that have no plan or fact yet

use crate::models::{LedgerKind, MonthPeriod};

use super::document::format_header;
use super::headings::SectionKind;

/// Sections present in a new file, in order
pub fn sections_for(kind: LedgerKind) -> &'static [SectionKind] {
    match kind {
        LedgerKind::Plan => &[
            SectionKind::Incomes,
            SectionKind::Expenses,
            SectionKind::Paid,
            SectionKind::Remaining,
        ],
        LedgerKind::Fact => &[SectionKind::Incomes, SectionKind::Expenses],
    }
}

/// Heading text for a section in this kind of file
pub fn section_title(kind: LedgerKind, section: SectionKind) -> &'static str {
    match kind {
        LedgerKind::Plan => section.plan_title(),
        LedgerKind::Fact => section.fact_title(),
    }
}

/// Header columns for a new table
pub fn section_columns(kind: LedgerKind, section: SectionKind) -> [&'static str; 4] {
    match (kind, section) {
        (LedgerKind::Fact, SectionKind::Expenses) => {
            ["Категория", "Сумма (руб.)", "Дата", "Примечание"]
        }
        _ => section.columns(),
    }
}

/// Render an empty monthly file
pub fn render(kind: LedgerKind, period: MonthPeriod) -> String {
    let title = match kind {
        LedgerKind::Plan => format!("# План на {} {}", period.month_name_ru(), period.year),
        LedgerKind::Fact => format!("# Факт за {} {}", period.month_name_ru(), period.year),
    };

    let mut out = String::new();
    out.push_str(&title);
    out.push('\n');

    for section in sections_for(kind) {
        let (header, separator) = format_header(&section_columns(kind, *section));
        out.push('\n');
        out.push_str(&format!("## {}\n\n{}\n{}\n", section_title(kind, *section), header, separator));
    }

    out
}
