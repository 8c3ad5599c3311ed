//! # Item Store
//!
//! The ordered, keyed collection of to-do items for one screen session.
//!
//! ```text
//! ItemStore
//! ├── items: Vec<Item>          // insertion order, keys pairwise distinct
//! ├── allocation: KeyAllocation // how the next key is chosen
//! └── counter: u64              // highest key ever handed out
//! ```
//!
//! Every mutation is synchronous and visible to the next render. Lookups of a
//! key that isn't in the store never touch the items; they return
//! `StoreError::UnknownKey` so the caller can log and carry on.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::item::{Item, ItemKey};

/// Strategy for choosing the key of a newly added item.
#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyAllocation {
    /// Last item's key + 1 (1 when empty). Resets once the list is emptied.
    #[serde(rename = "derived")]
    #[default]
    Derived,
    /// Monotonic counter kept alongside the list. Keys are never reused.
    #[serde(rename = "counter")]
    Counter,
}

impl KeyAllocation {
    pub fn label(self) -> &'static str {
        match self {
            KeyAllocation::Derived => "derived",
            KeyAllocation::Counter => "counter",
        }
    }

    /// Parses the lowercase name used in config files and env vars.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "derived" => Some(KeyAllocation::Derived),
            "counter" => Some(KeyAllocation::Counter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    UnknownKey(ItemKey),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownKey(key) => write!(f, "no item with key {key}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    allocation: KeyAllocation,
    counter: u64,
}

impl ItemStore {
    pub fn new(allocation: KeyAllocation) -> Self {
        Self {
            items: Vec::new(),
            allocation,
            counter: 0,
        }
    }

    pub fn allocation(&self) -> KeyAllocation {
        self.allocation
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|item| item.done).count()
    }

    pub fn position(&self, key: ItemKey) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    pub fn get(&self, key: ItemKey) -> Option<&Item> {
        self.items.iter().find(|item| item.key == key)
    }

    /// The key the next `add` will assign.
    pub fn next_key(&self) -> ItemKey {
        match self.allocation {
            KeyAllocation::Derived => {
                let last = self.items.last().map(|item| item.key.0).unwrap_or(0);
                ItemKey(last + 1)
            }
            KeyAllocation::Counter => ItemKey(self.counter + 1),
        }
    }

    /// Append a new, not-done item. Content is taken as-is, empty included.
    pub fn add(&mut self, content: impl Into<String>) -> &Item {
        let key = self.next_key();
        self.counter = self.counter.max(key.0);
        self.items.push(Item::new(key, content));
        &self.items[self.items.len() - 1]
    }

    pub fn set_done(&mut self, key: ItemKey, done: bool) -> Result<&Item, StoreError> {
        let item = self.get_mut(key)?;
        item.done = done;
        Ok(item)
    }

    pub fn set_content(
        &mut self,
        key: ItemKey,
        content: impl Into<String>,
    ) -> Result<&Item, StoreError> {
        let item = self.get_mut(key)?;
        item.content = content.into();
        Ok(item)
    }

    /// Remove the item in place; survivors keep their relative order.
    pub fn remove(&mut self, key: ItemKey) -> Result<Item, StoreError> {
        let index = self.position(key).ok_or(StoreError::UnknownKey(key))?;
        Ok(self.items.remove(index))
    }

    fn get_mut(&mut self, key: ItemKey) -> Result<&mut Item, StoreError> {
        self.items
            .iter_mut()
            .find(|item| item.key == key)
            .ok_or(StoreError::UnknownKey(key))
    }
}
