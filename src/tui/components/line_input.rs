//! # LineInput Component
//!
//! Single-line text field shared by the new-item box and by rows in edit
//! mode. The text and cursor live in a core `LineBuffer`; this module turns
//! key events into buffer edits and draws the visible part of the line.
//!
//! Long lines scroll horizontally so the cursor always stays in view. Widths
//! are measured in terminal columns (`unicode-width`), so wide characters
//! such as Hangul take two cells.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Widget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::line::LineBuffer;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// High-level events emitted while editing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// Text or cursor changed
    Changed,
    /// Enter pressed
    Submit,
}

impl EventHandler for LineBuffer {
    type Event = LineEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert_char(*c);
                Some(LineEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(LineEvent::Changed)
            }
            TuiEvent::Backspace => self.backspace().then_some(LineEvent::Changed),
            TuiEvent::Delete => self.delete().then_some(LineEvent::Changed),
            TuiEvent::CursorLeft => self.move_left().then_some(LineEvent::Changed),
            TuiEvent::CursorRight => self.move_right().then_some(LineEvent::Changed),
            TuiEvent::CursorHome => self.move_home().then_some(LineEvent::Changed),
            TuiEvent::CursorEnd => self.move_end().then_some(LineEvent::Changed),
            TuiEvent::Submit => Some(LineEvent::Submit),
            _ => None,
        }
    }
}

/// The part of `buffer` that fits in `width` columns with the cursor
/// visible, and the cursor's column within that part.
pub fn visible_window(buffer: &LineBuffer, width: u16) -> (&str, u16) {
    let width = width as usize;
    if width == 0 {
        return ("", 0);
    }

    let text = buffer.text();
    let before = buffer.before_cursor();

    // Drop leading chars until the cursor fits, keeping one cell for it
    let mut start = 0;
    while before[start..].width() > width - 1 {
        match before[start..].chars().next() {
            Some(c) => start += c.len_utf8(),
            None => break,
        }
    }

    let mut end = start;
    let mut used = 0;
    for c in text[start..].chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        end += c.len_utf8();
    }

    (&text[start..end], before[start..].width() as u16)
}

/// Renders a `LineBuffer` on a single row.
///
/// # Props
///
/// - `buffer`: text and cursor to show
/// - `style`: text style
/// - `placeholder`: dim hint shown while the buffer is empty
pub struct LineInput<'a> {
    pub buffer: &'a LineBuffer,
    pub style: Style,
    pub placeholder: Option<&'a str>,
}

impl<'a> LineInput<'a> {
    pub fn new(buffer: &'a LineBuffer) -> Self {
        Self {
            buffer,
            style: Style::default(),
            placeholder: None,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Column of the cursor relative to the left edge of the field.
    pub fn cursor_column(&self, width: u16) -> u16 {
        visible_window(self.buffer, width).1
    }
}

impl Widget for LineInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match self.placeholder {
            Some(hint) if self.buffer.is_empty() => {
                let dim = self.style.add_modifier(ratatui::style::Modifier::DIM);
                Span::styled(hint, dim).render(area, buf);
            }
            _ => {
                let (visible, _) = visible_window(self.buffer, area.width);
                Span::styled(visible, self.style).render(area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_edits_buffer() {
        let mut line = LineBuffer::new();
        assert_eq!(line.handle_event(&TuiEvent::InputChar('h')), Some(LineEvent::Changed));
        assert_eq!(line.handle_event(&TuiEvent::InputChar('i')), Some(LineEvent::Changed));
        assert_eq!(line.text(), "hi");

        assert_eq!(line.handle_event(&TuiEvent::CursorLeft), Some(LineEvent::Changed));
        assert_eq!(line.handle_event(&TuiEvent::Delete), Some(LineEvent::Changed));
        assert_eq!(line.text(), "h");
        assert_eq!(line.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_enter_is_submit_and_leaves_text() {
        let mut line = LineBuffer::with_text("milk");
        assert_eq!(line.handle_event(&TuiEvent::Submit), Some(LineEvent::Submit));
        assert_eq!(line.text(), "milk");
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let mut line = LineBuffer::with_text("milk");
        assert_eq!(line.handle_event(&TuiEvent::ScrollDown), None);
        assert_eq!(line.handle_event(&TuiEvent::FocusNext), None);
    }

    #[test]
    fn test_visible_window_short_text() {
        let line = LineBuffer::with_text("milk");
        assert_eq!(visible_window(&line, 10), ("milk", 4));
    }

    #[test]
    fn test_visible_window_scrolls_to_cursor() {
        let line = LineBuffer::with_text("abcdefghij");
        let (visible, col) = visible_window(&line, 5);
        assert_eq!(visible, "ghij");
        assert_eq!(col, 4);
    }

    #[test]
    fn test_visible_window_cursor_at_start_shows_head() {
        let mut line = LineBuffer::with_text("abcdefghij");
        line.move_home();
        assert_eq!(visible_window(&line, 5), ("abcde", 0));
    }

    #[test]
    fn test_visible_window_counts_wide_chars() {
        let line = LineBuffer::with_text("우유");
        assert_eq!(visible_window(&line, 10), ("우유", 4));

        let (visible, col) = visible_window(&line, 4);
        assert_eq!(visible, "유");
        assert_eq!(col, 2);
    }

    #[test]
    fn test_placeholder_rendered_when_empty() {
        let line = LineBuffer::new();
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        LineInput::new(&line).placeholder("What to do?").render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.starts_with("What to do?"));
    }
}
