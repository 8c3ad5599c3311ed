//! # Actions
//!
//! Every user intent becomes an `Action`.
//! User presses Enter in the input? That's `Action::Submit(text)`.
//! User ticks a checkbox? That's `Action::Toggle { key, done }`.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state in place. No I/O here; the caller redraws afterwards.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```
//!
//! Each action performs at most one store mutation, and any mode change that
//! goes with it happens inside the same call, so a redraw never sees an edit
//! that is half applied.

use log::{debug, info, warn};

use crate::core::item::ItemKey;
use crate::core::state::{App, EmptySubmissions};
use crate::core::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add a new item with this text and clear the input
    Submit(String),
    Toggle { key: ItemKey, done: bool },
    Edit { key: ItemKey, content: String },
    Delete(ItemKey),
    /// Display -> Editing
    BeginEdit(ItemKey),
    /// Editing -> Display, writing the draft
    ConfirmEdit(ItemKey),
    /// Editing -> Display, dropping the draft
    CancelEdit(ItemKey),
    Quit,
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Applying {:?}", action);
    match action {
        Action::Submit(text) => {
            submit(app, text);
        }
        Action::Toggle { key, done } => {
            if app.edits.is_editing(key) {
                debug!("Ignoring toggle of {} while it is being edited", key);
            } else if let Err(e) = app.store.set_done(key, done) {
                report(&e);
            }
        }
        Action::Edit { key, content } => {
            if let Err(e) = app.store.set_content(key, content) {
                report(&e);
            }
        }
        Action::Delete(key) => {
            if app.edits.is_editing(key) {
                debug!("Ignoring delete of {} while it is being edited", key);
            } else {
                match app.store.remove(key) {
                    Ok(_) => {
                        app.edits.discard(key);
                        app.status_message = format!("Deleted {}", key);
                    }
                    Err(e) => report(&e),
                }
            }
        }
        Action::BeginEdit(key) => match app.store.get(key) {
            Some(item) => {
                if !app.edits.begin(item) {
                    debug!("{} is already being edited", key);
                }
            }
            None => report(&StoreError::UnknownKey(key)),
        },
        Action::ConfirmEdit(key) => match app.edits.finish(key) {
            Some(draft) => {
                if let Err(e) = app.store.set_content(key, draft) {
                    report(&e);
                }
            }
            None => debug!("Confirm for {} which is not being edited", key),
        },
        Action::CancelEdit(key) => {
            if !app.allow_cancel_edit {
                debug!("Cancel edit disabled, keeping {} in edit mode", key);
            } else if app.edits.discard(key) {
                app.status_message = format!("Edit of {} cancelled", key);
            }
        }
        Action::Quit => {
            info!("Quit requested");
            return Effect::Quit;
        }
    }
    Effect::None
}

fn submit(app: &mut App, text: String) {
    if app.empty_submissions == EmptySubmissions::Reject && text.trim().is_empty() {
        app.status_message = "Nothing to add".to_string();
        return;
    }
    let key = app.store.add(text).key;
    app.input.clear();
    app.status_message = format!("Added {}", key);
}

/// Absent keys are a contract violation by the view; log and keep going.
fn report(error: &StoreError) {
    warn!("Store operation skipped: {}", error);
}
