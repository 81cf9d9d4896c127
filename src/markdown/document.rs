//! Line-level model of a markdown file
//!
//! The document keeps every original line untouched so that a mutation only
//! changes the lines it inserts or removes. Sections and tables are located
//! on demand as index spans over those lines.

use super::headings::SectionKind;

/// A heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub line: usize,
    pub level: usize,
    pub title: String,
}

/// A classified section: its heading and the exclusive end of its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: usize,
    pub level: usize,
    pub end: usize,
}

/// Location of a pipe table inside a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpan {
    /// Header row line
    pub header: usize,
    /// `|---|` separator line
    pub separator: usize,
    /// Data row lines, in order (blank rows excluded)
    pub rows: Vec<usize>,
    /// The "Итого" row, if any
    pub total: Option<usize>,
    /// One past the last line consumed as part of the table
    pub end: usize,
}

impl TableSpan {
    /// Where a new data row should go: before the total, or after the last row
    pub fn insertion_point(&self) -> usize {
        self.total.unwrap_or(self.end)
    }
}

/// A markdown file as a list of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    crlf: bool,
    trailing_newline: bool,
}

impl Document {
    /// Split text into lines, remembering the line ending style
    pub fn parse(text: &str) -> Self {
        let crlf = text.contains("\r\n");
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let body = if crlf {
            body.strip_suffix('\r').unwrap_or(body)
        } else {
            body
        };

        let lines = if text.is_empty() {
            Vec::new()
        } else if crlf {
            body.split("\r\n").map(str::to_string).collect()
        } else {
            body.split('\n').map(str::to_string).collect()
        };

        Self {
            lines,
            crlf,
            trailing_newline,
        }
    }

    /// Join the lines back with the original line ending
    pub fn render(&self) -> String {
        let newline = if self.crlf { "\r\n" } else { "\n" };
        let mut out = self.lines.join(newline);
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(newline);
        }
        out
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn insert_line(&mut self, at: usize, line: impl Into<String>) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, line.into());
    }

    pub fn remove_line(&mut self, at: usize) -> Option<String> {
        (at < self.lines.len()).then(|| self.lines.remove(at))
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        self.trailing_newline = true;
    }

    /// All heading lines in file order
    pub fn headings(&self) -> Vec<Heading> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| parse_heading(line).map(|(level, title)| Heading {
                line: i,
                level,
                title,
            }))
            .collect()
    }

    /// Find the first section of a kind
    pub fn section(&self, kind: SectionKind) -> Option<Section> {
        let headings = self.headings();
        headings.iter().enumerate().find_map(|(idx, heading)| {
            if heading.level < 2 || SectionKind::classify(&heading.title) != Some(kind) {
                return None;
            }
            let end = headings[idx + 1..]
                .iter()
                .find(|next| next.level <= heading.level)
                .map(|next| next.line)
                .unwrap_or(self.lines.len());
            Some(Section {
                kind,
                heading: heading.line,
                level: heading.level,
                end,
            })
        })
    }

    /// Find the first pipe table inside a section
    pub fn table_in(&self, section: &Section) -> Option<TableSpan> {
        let start = section.heading + 1;
        let end = section.end.min(self.lines.len());

        let header = (start..end.saturating_sub(1)).find(|&i| {
            is_table_line(&self.lines[i]) && is_separator(&self.lines[i + 1])
        })?;
        let separator = header + 1;

        let mut rows = Vec::new();
        let mut total = None;
        let mut cursor = separator + 1;
        while cursor < end && is_table_line(&self.lines[cursor]) {
            let line = &self.lines[cursor];
            if parse_heading(line).is_some() {
                break;
            }
            let cells = split_cells(line);
            cursor += 1;
            if is_total_row(&cells) {
                total = Some(cursor - 1);
                break;
            }
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            rows.push(cursor - 1);
        }

        Some(TableSpan {
            header,
            separator,
            rows,
            total,
            end: total.unwrap_or(cursor),
        })
    }

    /// Cells of a line
    pub fn cells(&self, line: usize) -> Vec<String> {
        self.lines.get(line).map(|l| split_cells(l)).unwrap_or_default()
    }
}

/// Parse `## Title` into (level, title)
pub fn parse_heading(line: &str) -> Option<(usize, String)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level, rest.trim().trim_end_matches('#').trim().to_string()))
}

/// A line that belongs to a pipe table
pub fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// `|---|:---:|` style separator row
pub fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|')
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Split a table row into trimmed cells, keeping empty cells in place
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

/// Rows whose first non-empty cell is a total label ("Итого", "**Итого:**")
pub fn is_total_row(cells: &[String]) -> bool {
    cells
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
        .map(|c| c.trim_matches('*').trim().to_lowercase().starts_with("итого"))
        .unwrap_or(false)
}

/// Render cells as a table row
pub fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Render a header row together with its separator
pub fn format_header(columns: &[&str]) -> (String, String) {
    let header = format!("| {} |", columns.join(" | "));
    let separator = format!(
        "|{}|",
        columns
            .iter()
            .map(|c| "-".repeat(c.chars().count() + 2))
            .collect::<Vec<_>>()
            .join("|")
    );
    (header, separator)
}
