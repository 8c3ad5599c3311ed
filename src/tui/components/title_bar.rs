//! # TitleBar Component
//!
//! Top status bar: list title, progress counts and the latest status message.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(&app.title, 3, 1, &app.status_message);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Todo List | 1/3 done | Added #3"`
//! 2. **Default**: `"Todo List | 1/3 done"`
//! 3. **Empty list**: `"Todo List | no items"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `title`: list title from config
/// - `total` / `done`: item counts from the store
/// - `status_message`: transient status (e.g. "Added #3")
pub struct TitleBar<'a> {
    pub title: &'a str,
    pub total: usize,
    pub done: usize,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(title: &'a str, total: usize, done: usize, status_message: &'a str) -> Self {
        Self {
            title,
            total,
            done,
            status_message,
        }
    }

    fn progress(&self) -> String {
        if self.total == 0 {
            "no items".to_string()
        } else {
            format!("{}/{} done", self.done, self.total)
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                self.title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::raw(self.progress()),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.to_string(),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
