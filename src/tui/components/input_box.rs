//! # InputBox Component
//!
//! The new-item row: a bordered text field with an `[Add]` button.
//!
//! ## Responsibilities
//!
//! - Display the input buffer (a prop from `App::input`)
//! - Place the terminal cursor while the box has focus
//! - Record where the field and button were drawn, for mouse hit testing
//!
//! Typing goes through `LineBuffer`'s `EventHandler` impl; submitting is an
//! `Action::Submit` applied by the event loop.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType};

use crate::core::line::LineBuffer;
use crate::tui::component::Component;
use crate::tui::components::line_input::LineInput;

/// Height of the input box: one line plus borders.
pub const INPUT_HEIGHT: u16 = 3;

const ADD_LABEL: &str = "[Add]";

/// What a click on the input box landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Field,
    AddButton,
}

/// Where the input box was last drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLayout {
    pub outer: Rect,
    pub field: Rect,
    pub add_button: Rect,
}

impl InputLayout {
    pub fn new(outer: Rect) -> Self {
        let inner = Block::bordered().inner(outer);
        let [field, _, add_button] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(ADD_LABEL.len() as u16),
        ])
        .areas(inner);
        Self {
            outer,
            field,
            add_button,
        }
    }

    pub fn hit_test(&self, col: u16, row: u16) -> Option<InputTarget> {
        let pos = Position::new(col, row);
        if self.add_button.contains(pos) {
            Some(InputTarget::AddButton)
        } else if self.outer.contains(pos) {
            Some(InputTarget::Field)
        } else {
            None
        }
    }
}

/// Text input with an add button.
///
/// # Props
///
/// - `buffer`: the new-item text (from `App::input`)
/// - `focused`: whether keystrokes currently go here
///
/// # State
///
/// - `layout`: where the box was drawn (written during render)
pub struct InputBox<'a> {
    pub buffer: &'a LineBuffer,
    pub focused: bool,
    pub layout: &'a mut InputLayout,
}

impl<'a> InputBox<'a> {
    pub fn new(buffer: &'a LineBuffer, focused: bool, layout: &'a mut InputLayout) -> Self {
        Self {
            buffer,
            focused,
            layout,
        }
    }
}

impl Component for InputBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        *self.layout = InputLayout::new(area);

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("New item");
        frame.render_widget(block, area);

        let field = LineInput::new(self.buffer)
            .style(Style::default().fg(Color::Green))
            .placeholder("What needs doing?");
        let cursor_col = field.cursor_column(self.layout.field.width);
        frame.render_widget(field, self.layout.field);

        let button_style = Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Span::styled(ADD_LABEL, button_style), self.layout.add_button);

        if self.focused && self.layout.field.width > 0 {
            frame.set_cursor_position((self.layout.field.x + cursor_col, self.layout.field.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_layout_places_button_on_the_right() {
        let layout = InputLayout::new(Rect::new(0, 0, 40, 3));
        assert_eq!(layout.add_button, Rect::new(34, 1, 5, 1));
        assert_eq!(layout.field, Rect::new(1, 1, 32, 1));
    }

    #[test]
    fn test_hit_test() {
        let layout = InputLayout::new(Rect::new(0, 5, 40, 3));
        assert_eq!(layout.hit_test(35, 6), Some(InputTarget::AddButton));
        assert_eq!(layout.hit_test(3, 6), Some(InputTarget::Field));
        assert_eq!(layout.hit_test(3, 2), None);
    }

    #[test]
    fn test_render_shows_text_and_button() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let buffer = LineBuffer::with_text("buy milk");
        let mut layout = InputLayout::default();

        terminal
            .draw(|f| {
                InputBox::new(&buffer, true, &mut layout).render(f, f.area());
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("New item"));
        assert!(text.contains("buy milk"));
        assert!(text.contains("[Add]"));
        assert_eq!(layout.outer, Rect::new(0, 0, 40, 3));
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let buffer = LineBuffer::new();
        let mut layout = InputLayout::default();

        terminal
            .draw(|f| {
                InputBox::new(&buffer, false, &mut layout).render(f, f.area());
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("What needs doing?"));
    }
}
