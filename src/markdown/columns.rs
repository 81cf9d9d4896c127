//! Mapping between row fields and table columns
//!
//! Tables are read by header names when they can be recognised and by
//! position otherwise, so a reordered or partly renamed header still maps
//! every field to a column.

use super::headings::SectionKind;

/// Header keywords per field, in field order
fn field_keywords(kind: SectionKind) -> [&'static [&'static str]; 4] {
    match kind {
        SectionKind::Incomes => [
            &["дата"],
            &["источник"],
            &["сумма"],
            &["примеч", "коммент"],
        ],
        SectionKind::Expenses | SectionKind::Remaining | SectionKind::Paid => [
            &["категор", "статья"],
            &["сумма"],
            &["срок", "дата"],
            &["примеч", "коммент"],
        ],
    }
}

/// Column index of each of the four row fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    fields: [usize; 4],
    width: usize,
}

impl ColumnMap {
    /// Build a map from header cells
    pub fn from_header(kind: SectionKind, header: &[String]) -> Self {
        let lowered: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();
        let keywords = field_keywords(kind);

        let mut fields: [Option<usize>; 4] = [None; 4];
        for (field, words) in keywords.iter().enumerate() {
            let found = lowered.iter().enumerate().position(|(col, name)| {
                !fields.contains(&Some(col)) && words.iter().any(|w| name.contains(w))
            });
            fields[field] = found;
        }

        // Unrecognised fields take the lowest free column
        let mut resolved = [0usize; 4];
        for field in 0..4 {
            resolved[field] = match fields[field] {
                Some(col) => col,
                None => {
                    let col = (0..)
                        .find(|col| !fields.contains(&Some(*col)))
                        .unwrap_or(field);
                    fields[field] = Some(col);
                    col
                }
            };
        }

        Self {
            fields: resolved,
            width: header.len(),
        }
    }

    /// Positional map for a table created by us
    pub fn positional(width: usize) -> Self {
        Self {
            fields: [0, 1, 2, 3],
            width,
        }
    }

    /// Read the four fields from a row's cells
    pub fn read(&self, cells: &[String]) -> [String; 4] {
        self.fields
            .map(|col| cells.get(col).cloned().unwrap_or_default())
    }

    /// Lay out four field values as row cells
    ///
    /// The row is as wide as the header. A value whose column lies beyond the
    /// header is only emitted when non-empty.
    pub fn write(&self, values: [String; 4]) -> Vec<String> {
        let needed = self
            .fields
            .iter()
            .zip(values.iter())
            .filter(|(_, v)| !v.is_empty())
            .map(|(col, _)| col + 1)
            .max()
            .unwrap_or(0);
        let width = self.width.max(needed);

        let mut cells = vec![String::new(); width];
        for (col, value) in self.fields.iter().zip(values) {
            if *col < width {
                cells[*col] = value;
            }
        }
        cells
    }
}
