//! # ItemRow Component
//!
//! One to-do item drawn as a bordered card, in either mode:
//!
//! ```text
//! Display:  ╭──────────────────────────────────────────────╮
//!           │buy milk                [x] [Edit] [Delete]   │
//!           ╰──────────────────────────────────────────────╯
//! Editing:  ╭ editing ─────────────────────────────────────╮
//!           │buy oat milk▏                 [Save] [Cancel] │
//!           ╰──────────────────────────────────────────────╯
//! ```
//!
//! `ItemRow` is a plain ratatui `Widget` so `ItemList` can draw it into a
//! scroll view. `RowLayout` is shared by rendering and mouse hit testing, so
//! a click always lands on the button that was drawn there.

use std::borrow::Cow;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::core::edit::ItemMode;
use crate::core::item::Item;
use crate::core::line::LineBuffer;
use crate::tui::components::line_input::LineInput;

/// Borders above and below the row content.
const VERTICAL_OVERHEAD: u16 = 2;
/// Borders left and right of the row content.
const HORIZONTAL_OVERHEAD: u16 = 2;

/// Clickable parts of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Checkbox,
    Edit,
    Delete,
    Save,
    Cancel,
    /// Anywhere else on the card
    Body,
}

impl RowTarget {
    fn label(self, done: bool) -> &'static str {
        match self {
            RowTarget::Checkbox if done => "[x]",
            RowTarget::Checkbox => "[ ]",
            RowTarget::Edit => "[Edit]",
            RowTarget::Delete => "[Delete]",
            RowTarget::Save => "[Save]",
            RowTarget::Cancel => "[Cancel]",
            RowTarget::Body => "",
        }
    }

    fn width(self) -> u16 {
        self.label(false).len() as u16
    }
}

/// Controls shown on the right of a row, left to right.
fn controls(mode: ItemMode, allow_cancel: bool) -> &'static [RowTarget] {
    match (mode, allow_cancel) {
        (ItemMode::Display, _) => &[RowTarget::Checkbox, RowTarget::Edit, RowTarget::Delete],
        (ItemMode::Editing, true) => &[RowTarget::Save, RowTarget::Cancel],
        (ItemMode::Editing, false) => &[RowTarget::Save],
    }
}

/// Columns taken by the controls, including one space before each.
fn controls_width(mode: ItemMode, allow_cancel: bool) -> u16 {
    controls(mode, allow_cancel)
        .iter()
        .map(|target| target.width() + 1)
        .sum()
}

/// Wrap item content to the text column width. Always at least one line.
fn wrap_content(content: &str, width: u16) -> Vec<Cow<'_, str>> {
    let options = textwrap::Options::new(width.max(1) as usize).break_words(true);
    let lines = textwrap::wrap(content, options);
    if lines.is_empty() {
        vec![Cow::Borrowed("")]
    } else {
        lines
    }
}

/// Height of a row drawn `row_width` columns wide.
pub fn row_height(item: &Item, mode: ItemMode, row_width: u16, allow_cancel: bool) -> u16 {
    match mode {
        ItemMode::Editing => 1 + VERTICAL_OVERHEAD,
        ItemMode::Display => {
            let text_width = row_width
                .saturating_sub(HORIZONTAL_OVERHEAD)
                .saturating_sub(controls_width(mode, allow_cancel));
            let lines = wrap_content(&item.content, text_width).len();
            u16::try_from(lines)
                .unwrap_or(u16::MAX)
                .saturating_add(VERTICAL_OVERHEAD)
        }
    }
}

/// Where each part of a row sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub row: Rect,
    /// Text column (content or draft field)
    pub body: Rect,
    pub buttons: Vec<(RowTarget, Rect)>,
}

impl RowLayout {
    pub fn new(row: Rect, mode: ItemMode, allow_cancel: bool) -> Self {
        let inner = Block::bordered().inner(row);
        let first_line = Rect {
            height: inner.height.min(1),
            ..inner
        };

        let targets = controls(mode, allow_cancel);
        let mut constraints = vec![Constraint::Min(0)];
        for target in targets {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(target.width()));
        }
        let areas = Layout::horizontal(constraints).split(first_line);

        let body = Rect {
            height: inner.height,
            ..areas[0]
        };
        let buttons = targets
            .iter()
            .enumerate()
            .map(|(i, target)| (*target, areas[2 + 2 * i]))
            .collect();

        Self { row, body, buttons }
    }

    pub fn hit_test(&self, pos: Position) -> Option<RowTarget> {
        if !self.row.contains(pos) {
            return None;
        }
        let target = self
            .buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(target, _)| *target)
            .unwrap_or(RowTarget::Body);
        Some(target)
    }
}

/// A single item card.
///
/// # Props
///
/// - `item`: the item to show
/// - `draft`: the edit draft when the row is in Editing mode
/// - `selected`: row has the list selection
/// - `focused`: the list pane has keyboard focus
/// - `allow_cancel`: show a `[Cancel]` button while editing
pub struct ItemRow<'a> {
    pub item: &'a Item,
    pub draft: Option<&'a LineBuffer>,
    pub selected: bool,
    pub focused: bool,
    pub allow_cancel: bool,
}

impl<'a> ItemRow<'a> {
    pub fn new(item: &'a Item, draft: Option<&'a LineBuffer>) -> Self {
        Self {
            item,
            draft,
            selected: false,
            focused: false,
            allow_cancel: false,
        }
    }

    pub fn selected(mut self, selected: bool, focused: bool) -> Self {
        self.selected = selected;
        self.focused = focused;
        self
    }

    pub fn allow_cancel(mut self, allow_cancel: bool) -> Self {
        self.allow_cancel = allow_cancel;
        self
    }

    pub fn mode(&self) -> ItemMode {
        if self.draft.is_some() {
            ItemMode::Editing
        } else {
            ItemMode::Display
        }
    }

    fn border_style(&self) -> Style {
        match (self.selected, self.focused) {
            (true, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::Cyan),
            _ => Style::default().fg(Color::DarkGray),
        }
    }
}

fn button_style() -> Style {
    Style::default().fg(Color::White).bg(Color::DarkGray)
}

impl Widget for ItemRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = self.mode();
        let layout = RowLayout::new(area, mode, self.allow_cancel);

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());
        if mode == ItemMode::Editing {
            block = block.title(Span::styled(" editing ", Style::default().fg(Color::Yellow)));
        }
        block.render(area, buf);

        match self.draft {
            Some(draft) => {
                LineInput::new(draft)
                    .style(Style::default().fg(Color::Yellow))
                    .render(layout.body, buf);
            }
            None => {
                let style = if self.item.done {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                let lines: Vec<Line> = wrap_content(&self.item.content, layout.body.width)
                    .into_iter()
                    .map(|line| Line::styled(line.into_owned(), style))
                    .collect();
                Paragraph::new(lines).render(layout.body, buf);
            }
        }

        for (target, rect) in &layout.buttons {
            let span = match target {
                RowTarget::Checkbox => {
                    let style = if self.item.done {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Span::styled(target.label(self.item.done), style)
                }
                _ => Span::styled(target.label(self.item.done), button_style()),
            };
            span.render(*rect, buf);
        }
    }
}
