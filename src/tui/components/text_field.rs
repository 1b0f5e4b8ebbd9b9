//! # TextField Component
//!
//! Single-line text input used by the composer, the search box, the login
//! gate, and the new-contact prompt.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste)
//! - Handle editing (backspace, delete, cursor movement)
//! - Scroll horizontally so the cursor stays visible
//! - Render a placeholder when empty and the cursor when focused
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `title`, `placeholder` and
//! `focused` are props set by the owner before rendering. The field never
//! decides what a submit means; it only reports `FieldEvent::Submit` and the
//! owner reads or takes the text.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from the area's left edge to the first text cell
const TEXT_OFFSET_X: u16 = 2;
/// Fields are always one text row plus borders
pub const FIELD_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// Buffer or cursor changed
    Changed,
    /// Enter pressed
    Submit,
}

pub struct TextField {
    buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Display column of the first visible cell
    scroll: usize,
    pub title: String,
    pub placeholder: String,
    pub focused: bool,
}

impl TextField {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
            title: title.into(),
            placeholder: placeholder.into(),
            focused: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the text and clear the field, unless it is blank (then nothing changes).
    pub fn take_nonblank(&mut self) -> Option<String> {
        if self.buffer.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.scroll = 0;
        Some(text)
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Display column of the cursor within the whole buffer.
    fn cursor_col(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    /// Keep the cursor inside the visible window of `width` cells.
    fn update_scroll(&mut self, width: usize) {
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let col = self.cursor_col();
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + width {
            self.scroll = col + 1 - width;
        }
    }

    /// The slice of the buffer that fits in the window starting at `self.scroll`.
    fn visible_text(&self, width: usize) -> String {
        let mut col = 0;
        let mut out = String::new();
        for c in self.buffer.chars() {
            let w = c.width().unwrap_or(0);
            if col >= self.scroll && col + w <= self.scroll + width {
                out.push(c);
            }
            col += w;
            if col >= self.scroll + width {
                break;
            }
        }
        out
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        self.update_scroll(width);

        let border_style = if self.focused {
            Style::default().fg(theme::ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str())
            .padding(Padding::horizontal(1));

        let line = if self.buffer.is_empty() {
            Line::styled(self.placeholder.as_str(), Style::default().fg(Color::DarkGray))
        } else {
            Line::raw(self.visible_text(width))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused && area.height >= FIELD_HEIGHT {
            let col = (self.cursor_col() - self.scroll) as u16;
            frame.set_cursor_position((area.x + TEXT_OFFSET_X + col, area.y + 1));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) if c.is_control() => None,
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: newlines become spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flat);
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => {
                let prev = prev_char_boundary(&self.buffer, self.cursor)?;
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(FieldEvent::Changed)
            }
            TuiEvent::Delete => {
                let next = next_char_boundary(&self.buffer, self.cursor)?;
                self.buffer.drain(self.cursor..next);
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor)?;
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor)?;
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                FieldEvent::Changed
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                FieldEvent::Changed
            }),
            TuiEvent::Submit => Some(FieldEvent::Submit),
            _ => None,
        }
    }
}

/// Byte offset of the character before `pos`, or None at the start.
fn prev_char_boundary(text: &str, pos: usize) -> Option<usize> {
    text[..pos].char_indices().next_back().map(|(i, _)| i)
}

/// Byte offset just past the character at `pos`, or None at the end.
fn next_char_boundary(text: &str, pos: usize) -> Option<usize> {
    text[pos..].chars().next().map(|c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn rendered(field: &mut TextField, width: u16) -> String {
        let backend = TestBackend::new(width, FIELD_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| field.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new("", "");
        type_str(&mut field, "при");
        assert_eq!(field.text(), "при");
        assert_eq!(field.handle_event(&TuiEvent::Backspace), Some(FieldEvent::Changed));
        assert_eq!(field.text(), "пр");
    }

    #[test]
    fn test_backspace_at_start_is_none() {
        let mut field = TextField::new("", "");
        assert_eq!(field.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(field.handle_event(&TuiEvent::CursorLeft), None);
    }

    #[test]
    fn test_cursor_movement_multibyte() {
        let mut field = TextField::new("", "");
        type_str(&mut field, "a🔥b");
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::Delete);
        assert_eq!(field.text(), "ab");
        field.handle_event(&TuiEvent::CursorHome);
        type_str(&mut field, "x");
        assert_eq!(field.text(), "xab");
        field.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(field.handle_event(&TuiEvent::CursorRight), None);
        assert_eq!(field.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut field = TextField::new("", "");
        field.handle_event(&TuiEvent::Paste("one\ntwo".into()));
        assert_eq!(field.text(), "one two");
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut field = TextField::new("", "");
        assert_eq!(field.handle_event(&TuiEvent::InputChar('\n')), None);
        assert!(field.is_empty());
    }

    #[test]
    fn test_submit_does_not_clear() {
        let mut field = TextField::new("", "");
        type_str(&mut field, "hi");
        assert_eq!(field.handle_event(&TuiEvent::Submit), Some(FieldEvent::Submit));
        assert_eq!(field.text(), "hi");
    }

    #[test]
    fn test_take_nonblank() {
        let mut field = TextField::new("", "");
        type_str(&mut field, "   ");
        assert_eq!(field.take_nonblank(), None);
        assert_eq!(field.text(), "   ");

        let mut field = TextField::new("", "");
        type_str(&mut field, "Привет");
        assert_eq!(field.take_nonblank().as_deref(), Some("Привет"));
        assert!(field.is_empty());
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let mut field = TextField::new("Поиск", "Введите имя");
        let text = rendered(&mut field, 30);
        assert!(text.contains("Поиск"));
        assert!(text.contains("Введите имя"));
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        let mut field = TextField::new("", "");
        field.focused = true;
        type_str(&mut field, "abcdefghijklmnopqrstuvwxyz");
        // 14 wide → 10 text cells
        let text = rendered(&mut field, 14);
        assert!(text.contains("rstuvwxyz"));
        assert!(!text.contains("abc"));

        field.handle_event(&TuiEvent::CursorHome);
        let text = rendered(&mut field, 14);
        assert!(text.contains("abcdefghij"));
    }

    #[test]
    fn test_char_boundaries() {
        assert_eq!(prev_char_boundary("café", 5), Some(3));
        assert_eq!(prev_char_boundary("café", 0), None);
        assert_eq!(next_char_boundary("café", 3), Some(5));
        assert_eq!(next_char_boundary("café", 5), None);
    }
}
