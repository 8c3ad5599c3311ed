//! # ItemList Component
//!
//! Scrollable list of item cards.
//!
//! ## Responsibilities
//!
//! - Draw one `ItemRow` per item, in store order
//! - Track the selected item (by key, so deletions don't shift it)
//! - Keep the selected row in view
//! - Hit testing for mouse clicks on rows and their buttons
//! - Cache row layout from the last render
//!
//! ## Architecture
//!
//! `ItemList` is a transient component (created each frame) that wraps
//! `&'a mut ItemListState` (persistent state) plus the store and edit modes
//! (props). Since `Component::render` takes `&mut self`, the layout cache and
//! scroll state are updated during the render pass.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::edit::{EditStates, ItemMode};
use crate::core::item::ItemKey;
use crate::core::store::ItemStore;
use crate::tui::component::Component;
use crate::tui::components::item_row::{ItemRow, RowLayout, RowTarget, row_height};
use crate::tui::components::line_input::LineInput;

/// A row as it was last drawn, in scroll-content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedRow {
    pub key: ItemKey,
    pub mode: ItemMode,
    pub top: u16,
    pub height: u16,
}

impl CachedRow {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }
}

/// Row geometry from the last render.
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    pub rows: Vec<CachedRow>,
    /// Width of the scroll content (viewport minus scrollbar)
    pub content_width: u16,
    pub allow_cancel: bool,
}

impl LayoutCache {
    pub fn total_height(&self) -> u16 {
        self.rows.last().map(CachedRow::bottom).unwrap_or(0)
    }

    pub fn row_at(&self, content_y: u16) -> Option<&CachedRow> {
        self.rows
            .iter()
            .find(|row| content_y >= row.top && content_y < row.bottom())
    }

    pub fn row_for(&self, key: ItemKey) -> Option<&CachedRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    fn row_layout(&self, row: &CachedRow) -> RowLayout {
        let rect = Rect::new(0, row.top, self.content_width, row.height);
        RowLayout::new(rect, row.mode, self.allow_cancel)
    }
}

/// Selection, scroll and layout state for the item list.
/// Must be persisted in the parent TuiState.
pub struct ItemListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    pub selected: Option<ItemKey>,
    /// Store index of the selection, used to pick a neighbour once it's gone
    last_index: usize,
    /// Inner area the rows were drawn into
    pub viewport: Rect,
    /// Row to scroll into view on the next render
    reveal: Option<ItemKey>,
}

impl Default for ItemListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            selected: None,
            last_index: 0,
            viewport: Rect::default(),
            reveal: None,
        }
    }

    pub fn select(&mut self, store: &ItemStore, key: ItemKey) {
        if let Some(index) = store.position(key) {
            self.select_index(store, index);
        }
    }

    fn select_index(&mut self, store: &ItemStore, index: usize) {
        let Some(item) = store.items().get(index) else {
            return;
        };
        self.selected = Some(item.key);
        self.last_index = index;
        self.reveal = Some(item.key);
    }

    /// Store index of the selected item, if it still exists.
    pub fn selected_index(&self, store: &ItemStore) -> Option<usize> {
        self.selected.and_then(|key| store.position(key))
    }

    pub fn select_next(&mut self, store: &ItemStore) {
        if store.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self.selected_index(store) {
            Some(i) => (i + 1).min(store.len() - 1),
            None => 0,
        };
        self.select_index(store, next);
    }

    pub fn select_prev(&mut self, store: &ItemStore) {
        if store.is_empty() {
            self.selected = None;
            return;
        }
        let prev = match self.selected_index(store) {
            Some(i) => i.saturating_sub(1),
            None => store.len() - 1,
        };
        self.select_index(store, prev);
    }

    pub fn select_first(&mut self, store: &ItemStore) {
        self.select_index(store, 0);
    }

    pub fn select_last(&mut self, store: &ItemStore) {
        if let Some(last) = store.len().checked_sub(1) {
            self.select_index(store, last);
        }
    }

    /// Select something sensible if nothing is selected yet.
    pub fn ensure_selection(&mut self, store: &ItemStore) {
        if self.selected_index(store).is_none() {
            self.reconcile(store);
            if self.selected.is_none() {
                self.select_first(store);
            }
        }
    }

    /// Re-point the selection after the store changed.
    ///
    /// A deleted selection moves to the item that took its place, else to
    /// the new last item, else to nothing.
    pub fn reconcile(&mut self, store: &ItemStore) {
        let Some(key) = self.selected else {
            return;
        };
        match store.position(key) {
            Some(index) => self.last_index = index,
            None if store.is_empty() => {
                self.selected = None;
                self.last_index = 0;
            }
            None => {
                let index = self.last_index.min(store.len() - 1);
                self.select_index(store, index);
            }
        }
    }

    /// Scroll `key`'s row into view on the next render.
    pub fn reveal(&mut self, key: ItemKey) {
        self.reveal = Some(key);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_state.scroll_up();
    }

    pub fn scroll_down(&mut self) {
        self.scroll_state.scroll_down();
        self.clamp_scroll();
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll_state.scroll_page_up();
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll_state.scroll_page_down();
        self.clamp_scroll();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self
            .layout
            .total_height()
            .saturating_sub(self.viewport.height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll so the row for `key` is fully visible.
    /// If the row is taller than the viewport, align its top edge.
    pub fn scroll_to_key(&mut self, key: ItemKey) {
        let Some(row) = self.layout.row_for(key).copied() else {
            return;
        };
        let offset_y = self.scroll_state.offset().y;
        let viewport_height = self.viewport.height;

        if row.top < offset_y || row.height > viewport_height {
            self.scroll_state.set_offset(Position { x: 0, y: row.top });
        } else if row.bottom() > offset_y + viewport_height {
            let new_y = row.bottom().saturating_sub(viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Map a screen position to the row (and part of it) drawn there.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<(ItemKey, RowTarget)> {
        if !self.viewport.contains(Position::new(col, row)) {
            return None;
        }
        let content_x = col - self.viewport.x;
        let content_y = row - self.viewport.y + self.scroll_state.offset().y;

        let cached = self.layout.row_at(content_y)?;
        self.layout
            .row_layout(cached)
            .hit_test(Position::new(content_x, content_y))
            .map(|target| (cached.key, target))
    }

    /// Screen position of the draft cursor for `key`, if its row is visible.
    fn draft_cursor(&self, key: ItemKey, edits: &EditStates) -> Option<Position> {
        let draft = edits.draft(key)?;
        let cached = self.layout.row_for(key)?;
        let body = self.layout.row_layout(cached).body;
        let offset_y = self.scroll_state.offset().y;

        if body.y < offset_y || body.y >= offset_y + self.viewport.height {
            return None;
        }
        let col = LineInput::new(draft).cursor_column(body.width);
        Some(Position::new(
            self.viewport.x + body.x + col,
            self.viewport.y + body.y - offset_y,
        ))
    }
}

/// Scrollable item view component.
/// Created fresh each frame with references to state and data.
pub struct ItemList<'a> {
    pub state: &'a mut ItemListState,
    pub store: &'a ItemStore,
    pub edits: &'a EditStates,
    pub focused: bool,
    pub allow_cancel: bool,
}

impl<'a> ItemList<'a> {
    pub fn new(
        state: &'a mut ItemListState,
        store: &'a ItemStore,
        edits: &'a EditStates,
        focused: bool,
        allow_cancel: bool,
    ) -> Self {
        Self {
            state,
            store,
            edits,
            focused,
            allow_cancel,
        }
    }

    fn key_hints(&self) -> &'static str {
        if !self.focused {
            return " Enter add  Tab list  Ctrl+C quit ";
        }
        let editing = self
            .state
            .selected
            .is_some_and(|key| self.edits.is_editing(key));
        match (editing, self.allow_cancel) {
            (true, true) => " Enter save  Esc cancel  ↑↓ select  Tab input ",
            (true, false) => " Enter save  ↑↓ select  Tab input ",
            (false, _) => " ↑↓ select  Space toggle  e edit  d delete  Tab input  q quit ",
        }
    }

    fn rebuild_layout(&mut self, content_width: u16) {
        let mut rows = Vec::with_capacity(self.store.len());
        let mut top = 0u16;
        for item in self.store.items() {
            let mode = self.edits.mode(item.key);
            let height = row_height(item, mode, content_width, self.allow_cancel);
            rows.push(CachedRow {
                key: item.key,
                mode,
                top,
                height,
            });
            top = top.saturating_add(height);
        }
        self.state.layout = LayoutCache {
            rows,
            content_width,
            allow_cancel: self.allow_cancel,
        };
    }
}

impl Component for ItemList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Items ")
            .title_bottom(Line::from(self.key_hints()).centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.state.viewport = inner;

        if self.store.is_empty() {
            self.state.layout = LayoutCache::default();
            let hint = Paragraph::new(vec![
                Line::from("Nothing to do yet."),
                Line::from("Type above and press Enter to add an item."),
            ])
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
            frame.render_widget(hint, inner);
            return;
        }

        // 1. Update layout cache
        let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
        self.rebuild_layout(content_width);

        // 2. Scroll
        if let Some(key) = self.state.reveal.take() {
            self.state.scroll_to_key(key);
        }
        self.state.clamp_scroll();

        // 3. Draw rows into the scroll view
        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (item, cached) in self.store.items().iter().zip(&self.state.layout.rows) {
            let selected = self.state.selected == Some(item.key);
            let row = ItemRow::new(item, self.edits.draft(item.key))
                .selected(selected, self.focused)
                .allow_cancel(self.allow_cancel);
            let rect = Rect::new(0, cached.top, content_width, cached.height);
            scroll_view.render_widget(row, rect);
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);

        // 4. Cursor for the row being edited
        if self.focused
            && let Some(key) = self.state.selected
            && let Some(pos) = self.state.draft_cursor(key, self.edits)
        {
            frame.set_cursor_position(pos);
        }
    }
}
