//! # Core Application Logic
//!
//! The to-do list's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ItemStore (items)    │
//!                    │  • EditStates (modes)   │
//!                    │  • Action (intents)     │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`]: `Item` and `ItemKey`
//! - [`store`]: `ItemStore`, the ordered keyed collection
//! - [`line`]: `LineBuffer`, single-line text with a cursor
//! - [`edit`]: per-row Display/Editing modes and drafts
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod edit;
pub mod item;
pub mod line;
pub mod state;
pub mod store;
