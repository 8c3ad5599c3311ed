//! # Item View Modes
//!
//! Each item row is either in `Display` or `Editing` mode. Editing rows carry
//! a draft buffer that is seeded from the item's content when editing starts
//! and only reaches the store when the edit is confirmed.
//!
//! ```text
//!             begin: seed draft
//!   Display ────────────────────▶ Editing ◀──┐
//!      ▲                            │   │     │ keystroke: draft only
//!      │   confirm: write draft     │   └─────┘
//!      ├────────────────────────────┤
//!      │   cancel: drop draft       │  (only when enabled)
//!      └────────────────────────────┘
//! ```
//!
//! Modes live here rather than on `Item` because they are view state: they
//! vanish when the row does, and are never part of the stored item.

use std::collections::HashMap;

use crate::core::item::{Item, ItemKey};
use crate::core::line::LineBuffer;

/// Presentation mode of a single item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMode {
    Display,
    Editing,
}

/// Drafts for every row currently in `Editing` mode, keyed by item.
/// A key that is absent is in `Display` mode.
#[derive(Debug, Clone, Default)]
pub struct EditStates {
    drafts: HashMap<ItemKey, LineBuffer>,
}

impl EditStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self, key: ItemKey) -> ItemMode {
        if self.drafts.contains_key(&key) {
            ItemMode::Editing
        } else {
            ItemMode::Display
        }
    }

    pub fn is_editing(&self, key: ItemKey) -> bool {
        self.drafts.contains_key(&key)
    }

    /// Number of rows in `Editing` mode.
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// `Display -> Editing`. Seeds the draft from the item's current content.
    ///
    /// Returns `false` if the row was already editing; its draft is kept.
    pub fn begin(&mut self, item: &Item) -> bool {
        if self.drafts.contains_key(&item.key) {
            return false;
        }
        self.drafts
            .insert(item.key, LineBuffer::with_text(item.content.clone()));
        true
    }

    pub fn draft(&self, key: ItemKey) -> Option<&LineBuffer> {
        self.drafts.get(&key)
    }

    /// Mutable draft for keystrokes. Never touches the store.
    pub fn draft_mut(&mut self, key: ItemKey) -> Option<&mut LineBuffer> {
        self.drafts.get_mut(&key)
    }

    /// `Editing -> Display`, handing back the draft text to be written.
    pub fn finish(&mut self, key: ItemKey) -> Option<String> {
        self.drafts.remove(&key).map(|mut draft| draft.take())
    }

    /// `Editing -> Display` without keeping the draft.
    pub fn discard(&mut self, key: ItemKey) -> bool {
        self.drafts.remove(&key).is_some()
    }
}
