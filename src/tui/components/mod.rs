//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top status bar with title, progress and status message
//! - `ItemRow`: One item card, in display or edit mode
//! - `LineInput`: Single-line text field with horizontal scrolling
//!
//! ### Stateful Components
//!
//! Components that write layout back into persistent state during render,
//! so the event loop can hit test mouse clicks against what was drawn:
//! - `InputBox`: New-item field plus `[Add]` button (`InputLayout`)
//! - `ItemList`: Scrollable item view with selection (`ItemListState`)
//!
//! ### Props-Based Data Flow
//!
//! Components receive store data, drafts and focus as props rather than
//! reading `App` directly:
//!
//! ```rust,ignore
//! ItemList::new(&mut tui.item_list, &app.store, &app.edits, focused, allow_cancel)
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── title_bar.rs   (Top status bar)
//! ├── line_input.rs  (LineBuffer event handling and rendering)
//! ├── input_box.rs   (New-item field)
//! ├── item_row.rs    (Single item card, row layout)
//! └── item_list.rs   (Scrollable item container)
//! ```

pub mod input_box;
pub mod item_list;
pub mod item_row;
pub mod line_input;
pub mod title_bar;

pub use input_box::{InputBox, InputLayout, InputTarget};
pub use item_list::{ItemList, ItemListState};
pub use item_row::RowTarget;
pub use title_bar::TitleBar;
