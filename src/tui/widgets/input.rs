//! Text input field
//!
//! Holds the text and a cursor counted in characters, so Cyrillic input
//! edits correctly. Renders as a single styled line.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// A single-line text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    /// Render every character as `*`
    masked: bool,
    placeholder: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder shown while empty
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Hide the content when rendering
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Replace the content, cursor at the end
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.chars().count();
    }

    /// Builder form of [`TextInput::set`]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set(content);
        self
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }

    /// Trimmed content, `None` when blank
    pub fn optional(&self) -> Option<String> {
        let trimmed = self.content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Render as a line with a block cursor when focused
    pub fn line(&self, focused: bool) -> Line<'static> {
        let shown: String = if self.masked {
            "*".repeat(self.char_len())
        } else {
            self.content.clone()
        };

        if shown.is_empty() && !focused {
            return Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        if !focused {
            return Line::from(Span::styled(shown, Style::default().fg(Color::White)));
        }

        let before: String = shown.chars().take(self.cursor).collect();
        let at = shown.chars().nth(self.cursor).unwrap_or(' ');
        let after: String = shown.chars().skip(self.cursor + 1).collect();

        Line::from(vec![
            Span::styled(before, Style::default().fg(Color::White)),
            Span::styled(
                at.to_string(),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(after, Style::default().fg(Color::White)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyrillic_editing() {
        let mut input = TextInput::new().content("Кафе");
        assert_eq!(input.cursor(), 4);

        input.move_left();
        input.insert('ю');
        assert_eq!(input.value(), "Кафюе");

        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "Кае");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "ае");
    }

    #[test]
    fn test_optional() {
        assert_eq!(TextInput::new().content("  ").optional(), None);
        assert_eq!(
            TextInput::new().content(" note ").optional().as_deref(),
            Some("note")
        );
    }

    #[test]
    fn test_masked_line_hides_content() {
        let input = TextInput::new().masked().content("ghp_secret");
        let line = input.line(false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "**********");
    }
}
