use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Character shown in place of each character of a masked field.
const MASK_CHAR: char = '•';

/// A single-line text input with a cursor and horizontal scrolling.
///
/// The cursor is a character index, so multi-byte input edits correctly.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    /// Render as mask characters (passwords)
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field whose content is never drawn in clear.
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Insert pasted text at the cursor. Line breaks become spaces.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' | '\t' => self.insert_char(' '),
                c => self.insert_char(c),
            }
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Replace the content and put the cursor at the end.
    pub fn set_value(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The characters as drawn, masked if needed.
    fn display_chars(&self) -> Vec<char> {
        if self.masked {
            vec![MASK_CHAR; self.char_count()]
        } else {
            self.content.chars().collect()
        }
    }

    /// First character to draw so the cursor stays inside `width` columns.
    fn scroll_offset(chars: &[char], cursor: usize, width: usize) -> usize {
        if width == 0 {
            return cursor;
        }
        // Walk back from the cursor until the columns run out, keeping one
        // column for the cursor block.
        let mut used = 1;
        let mut start = cursor;
        while start > 0 {
            let w = chars[start - 1].width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            start -= 1;
        }
        start
    }

    pub fn render_with_title(&self, area: Rect, buf: &mut Buffer, title: &str, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let chars = self.display_chars();
        let width = inner.width as usize;
        let start = Self::scroll_offset(&chars, self.cursor, width);

        let text_style = Style::default().fg(Color::White);
        let cursor_style = Style::default().fg(Color::Black).bg(Color::Cyan);

        let mut x = 0usize;
        for (i, c) in chars.iter().enumerate().skip(start) {
            let w = c.width().unwrap_or(0);
            if x + w > width {
                break;
            }
            let style = if focused && i == self.cursor {
                cursor_style
            } else {
                text_style
            };
            buf.set_string(inner.x + x as u16, inner.y, c.to_string(), style);
            x += w;
        }

        if focused && self.cursor >= chars.len() && x < width {
            buf.set_string(inner.x + x as u16, inner.y, " ", cursor_style);
        }
    }
}

/// Renders a [`TextField`] inside a titled border.
pub struct TextFieldWidget<'a> {
    field: &'a TextField,
    title: &'a str,
    focused: bool,
}

impl<'a> TextFieldWidget<'a> {
    pub fn new(field: &'a TextField, title: &'a str, focused: bool) -> Self {
        Self {
            field,
            title,
            focused,
        }
    }
}

impl Widget for TextFieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.field
            .render_with_title(area, buf, self.title, self.focused);
    }
}
