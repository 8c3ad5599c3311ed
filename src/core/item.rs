//! # Items
//!
//! A single to-do entry and the key that identifies it inside an `ItemStore`.

use std::fmt;

/// Identifier of an item within one store. Assigned at creation, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(pub u64);

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: ItemKey,
    pub content: String,
    pub done: bool,
}

impl Item {
    pub fn new(key: ItemKey, content: impl Into<String>) -> Self {
        Self {
            key,
            content: content.into(),
            done: false,
        }
    }
}
