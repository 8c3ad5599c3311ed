//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use ratatui::backend::TestBackend;
use ratatui::Terminal;

use crate::core::state::App;
use crate::core::store::KeyAllocation;

/// Creates a test App with default settings and no items.
pub fn test_app() -> App {
    App::new(KeyAllocation::Derived)
}

/// Creates a test App holding one item per entry, keys 1..=n.
pub fn test_app_with_items(contents: &[&str]) -> App {
    let mut app = test_app();
    for content in contents {
        app.store.add(*content);
    }
    app
}

/// Flattens a test terminal's buffer into one string, row after row.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

/// Text of a single screen row.
pub fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width;
    (0..width).map(|x| buffer[(x, y)].symbol()).collect()
}

/// Screen column where `needle` starts in `line`, counting cells not bytes.
pub fn column_of(line: &str, needle: &str) -> Option<u16> {
    line.find(needle)
        .map(|byte| line[..byte].chars().count() as u16)
}
