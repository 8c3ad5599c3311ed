//! # Application State
//!
//! Core business state for the to-do screen. Domain logic only, no TUI
//! types. Presentation state (focus, scroll, selection) lives in `tui`.
//!
//! ```text
//! App
//! ├── store: ItemStore              // the to-do items
//! ├── input: LineBuffer             // new-item text being typed
//! ├── edits: EditStates             // rows in Editing mode + their drafts
//! ├── title: String                 // title bar text
//! ├── status_message: String        // status bar text
//! ├── empty_submissions: EmptySubmissions
//! └── allow_cancel_edit: bool
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! except keystrokes into `input` and draft buffers, which never reach the
//! store on their own.

use serde::{Deserialize, Serialize};

use crate::core::config::{DEFAULT_TITLE, ResolvedConfig};
use crate::core::edit::EditStates;
use crate::core::line::LineBuffer;
use crate::core::store::{ItemStore, KeyAllocation};

/// What to do with a submission that is empty or whitespace only.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptySubmissions {
    /// Add it like any other text
    #[serde(rename = "accept")]
    #[default]
    Accept,
    /// Drop it and keep the input as typed
    #[serde(rename = "reject")]
    Reject,
}

impl EmptySubmissions {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "accept" => Some(EmptySubmissions::Accept),
            "reject" => Some(EmptySubmissions::Reject),
            _ => None,
        }
    }
}

pub struct App {
    pub store: ItemStore,
    pub input: LineBuffer,
    pub edits: EditStates,
    pub title: String,
    pub status_message: String,
    pub empty_submissions: EmptySubmissions,
    /// When false, leaving edit mode always writes the draft.
    pub allow_cancel_edit: bool,
}

impl App {
    pub fn new(key_allocation: KeyAllocation) -> Self {
        Self {
            store: ItemStore::new(key_allocation),
            input: LineBuffer::new(),
            edits: EditStates::new(),
            title: DEFAULT_TITLE.to_string(),
            status_message: String::new(),
            empty_submissions: EmptySubmissions::default(),
            allow_cancel_edit: false,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            title: config.title.clone(),
            empty_submissions: config.empty_submissions,
            allow_cancel_edit: config.allow_cancel_edit,
            ..Self::new(config.key_allocation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, TodoConfig, resolve_with_env};
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.store.is_empty());
        assert!(app.input.is_empty());
        assert!(app.edits.is_empty());
        assert_eq!(app.title, "Todo List");
        assert_eq!(app.empty_submissions, EmptySubmissions::Accept);
        assert!(!app.allow_cancel_edit);
    }

    #[test]
    fn test_app_from_config() {
        let cli = CliOverrides {
            key_allocation: Some(KeyAllocation::Counter),
            reject_empty: true,
            allow_cancel_edit: true,
            ..Default::default()
        };
        let config = resolve_with_env(&TodoConfig::default(), &cli, |_| None);
        let app = App::from_config(&config);
        assert_eq!(app.store.allocation(), KeyAllocation::Counter);
        assert_eq!(app.empty_submissions, EmptySubmissions::Reject);
        assert!(app.allow_cancel_edit);
    }

    #[test]
    fn test_empty_submissions_from_name() {
        assert_eq!(EmptySubmissions::from_name("REJECT"), Some(EmptySubmissions::Reject));
        assert_eq!(EmptySubmissions::from_name("maybe"), None);
    }
}
