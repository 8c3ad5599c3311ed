//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the event loop only redraws after input. It sleeps
//! up to 500ms waiting for an event, applies it, and draws before reading
//! the next one. Mouse clicks are therefore always hit tested against the
//! frame the user actually saw.
//!
//! ## Focus
//!
//! Two panes take keyboard input. The input box (initial focus) edits the
//! new-item text. The list moves the selection and acts on the selected
//! item; a row in edit mode takes text keys into its draft instead.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::item::ItemKey;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::line_input::LineEvent;
use crate::tui::components::{InputLayout, InputTarget, ItemListState, RowTarget};
use crate::tui::event::{TuiEvent, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing edits the new-item text. Tab, Down or Esc move to the list.
    Input,
    /// Keys act on the selected item. Typing a letter moves back to Input.
    List,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    // Persistent component states
    pub item_list: ItemListState,
    pub input_layout: InputLayout,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Input, // User expects to type immediately
            item_list: ItemListState::new(),
            input_layout: InputLayout::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Unsupported terminals ignore the enhancement flags
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    let result = event_loop(&mut terminal, &mut app, &mut tui);

    drop(terminal_mode_guard);
    ratatui::restore();
    info!(
        "Exiting with {} items ({} done)",
        app.store.len(),
        app.store.done_count()
    );
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    terminal.draw(|f| ui::draw_ui(f, app, tui))?; // First frame

    loop {
        let Some(event) = poll_event_timeout(IDLE_POLL) else {
            continue;
        };
        let effect = apply_and_draw(app, tui, event, |app, tui| {
            terminal.draw(|f| ui::draw_ui(f, app, tui)).map(|_| ())
        })?;
        if effect == Effect::Quit {
            return Ok(());
        }
    }
}

/// Apply one event, then redraw unless it quit.
fn apply_and_draw<E>(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    mut draw: impl FnMut(&App, &mut TuiState) -> Result<(), E>,
) -> Result<Effect, E> {
    let effect = handle_event(app, tui, event);
    if effect != Effect::Quit {
        draw(app, tui)?;
    }
    Ok(effect)
}

/// Route one event to the right pane and apply the resulting actions.
///
/// The status message only describes the latest event, so it is cleared first.
pub fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if event != TuiEvent::Resize {
        app.status_message.clear();
    }
    let effect = match event {
        // Ctrl+C always quits regardless of focus
        TuiEvent::ForceQuit => update(app, Action::Quit),
        // Resize just needs a redraw
        TuiEvent::Resize => Effect::None,
        // Wheel and page keys always scroll the list
        TuiEvent::ScrollUp => {
            tui.item_list.scroll_up();
            Effect::None
        }
        TuiEvent::ScrollDown => {
            tui.item_list.scroll_down();
            Effect::None
        }
        TuiEvent::ScrollPageUp => {
            tui.item_list.scroll_page_up();
            Effect::None
        }
        TuiEvent::ScrollPageDown => {
            tui.item_list.scroll_page_down();
            Effect::None
        }
        TuiEvent::MouseClick(col, row) => handle_click(app, tui, col, row),
        _ => match tui.focus {
            Focus::Input => handle_input_key(app, tui, event),
            Focus::List => handle_list_key(app, tui, event),
        },
    };
    tui.item_list.reconcile(&app.store);
    effect
}

fn handle_input_key(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::FocusNext | TuiEvent::FocusPrev | TuiEvent::Escape | TuiEvent::CursorDown => {
            focus_list(app, tui);
            Effect::None
        }
        _ => match app.input.handle_event(&event) {
            Some(LineEvent::Submit) => submit_input(app, tui),
            _ => Effect::None,
        },
    }
}

fn handle_list_key(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let selected = tui.item_list.selected;
    if let Some(key) = selected
        && app.edits.is_editing(key)
    {
        return handle_draft_key(app, tui, key, event);
    }

    match event {
        TuiEvent::CursorUp | TuiEvent::InputChar('k') => tui.item_list.select_prev(&app.store),
        TuiEvent::CursorDown | TuiEvent::InputChar('j') => tui.item_list.select_next(&app.store),
        TuiEvent::CursorHome => tui.item_list.select_first(&app.store),
        TuiEvent::CursorEnd => tui.item_list.select_last(&app.store),
        TuiEvent::FocusNext | TuiEvent::FocusPrev => tui.focus = Focus::Input,
        TuiEvent::InputChar('q') => return update(app, Action::Quit),
        TuiEvent::InputChar(' ') | TuiEvent::InputChar('x') => {
            if let Some(key) = selected {
                return toggle(app, key);
            }
        }
        TuiEvent::Submit | TuiEvent::InputChar('e') => {
            if let Some(key) = selected {
                return update(app, Action::BeginEdit(key));
            }
        }
        TuiEvent::Delete | TuiEvent::InputChar('d') => {
            if let Some(key) = selected {
                return update(app, Action::Delete(key));
            }
        }
        // Typing anything else starts a new item
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
            tui.focus = Focus::Input;
            app.input.handle_event(&event);
        }
        _ => {}
    }
    Effect::None
}

/// Keys for a selected row that is in edit mode.
fn handle_draft_key(app: &mut App, tui: &mut TuiState, key: ItemKey, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::CursorUp => tui.item_list.select_prev(&app.store),
        TuiEvent::CursorDown => tui.item_list.select_next(&app.store),
        TuiEvent::FocusNext | TuiEvent::FocusPrev => tui.focus = Focus::Input,
        TuiEvent::Escape => return update(app, Action::CancelEdit(key)),
        _ => {
            let Some(draft) = app.edits.draft_mut(key) else {
                return Effect::None;
            };
            if draft.handle_event(&event) == Some(LineEvent::Submit) {
                return update(app, Action::ConfirmEdit(key));
            }
        }
    }
    Effect::None
}

fn handle_click(app: &mut App, tui: &mut TuiState, col: u16, row: u16) -> Effect {
    if let Some(target) = tui.input_layout.hit_test(col, row) {
        tui.focus = Focus::Input;
        return match target {
            InputTarget::AddButton => submit_input(app, tui),
            InputTarget::Field => Effect::None,
        };
    }

    let Some((key, target)) = tui.item_list.hit_test(col, row) else {
        return Effect::None;
    };
    tui.focus = Focus::List;
    tui.item_list.select(&app.store, key);

    match target {
        RowTarget::Checkbox => toggle(app, key),
        RowTarget::Edit => update(app, Action::BeginEdit(key)),
        RowTarget::Delete => update(app, Action::Delete(key)),
        RowTarget::Save => update(app, Action::ConfirmEdit(key)),
        RowTarget::Cancel => update(app, Action::CancelEdit(key)),
        RowTarget::Body => Effect::None,
    }
}

fn focus_list(app: &App, tui: &mut TuiState) {
    tui.focus = Focus::List;
    tui.item_list.ensure_selection(&app.store);
}

fn submit_input(app: &mut App, tui: &mut TuiState) -> Effect {
    let text = app.input.text().to_string();
    let before = app.store.len();
    let effect = update(app, Action::Submit(text));
    if app.store.len() > before
        && let Some(item) = app.store.items().last()
    {
        tui.item_list.reveal(item.key);
    }
    effect
}

/// Flip the checkbox of `key`.
fn toggle(app: &mut App, key: ItemKey) -> Effect {
    let Some(item) = app.store.get(key) else {
        return Effect::None;
    };
    let action = Action::Toggle {
        key,
        done: !item.done,
    };
    update(app, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::edit::ItemMode;
    use crate::test_support::{column_of, row_text, test_app, test_app_with_items};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn send(app: &mut App, tui: &mut TuiState, events: &[TuiEvent]) -> Effect {
        let mut effect = Effect::None;
        for event in events {
            effect = handle_event(app, tui, event.clone());
        }
        effect
    }

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, TuiEvent::InputChar(c));
        }
    }

    fn draw(app: &App, tui: &mut TuiState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| ui::draw_ui(f, app, tui)).unwrap();
        terminal
    }

    #[test]
    fn test_typing_and_enter_adds_item() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        type_text(&mut app, &mut tui, "buy milk");
        assert_eq!(app.input.text(), "buy milk");
        send(&mut app, &mut tui, &[TuiEvent::Submit]);

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.items()[0].content, "buy milk");
        assert!(app.input.is_empty());
        assert_eq!(tui.focus, Focus::Input);
    }

    #[test]
    fn test_q_types_in_input_and_quits_in_list() {
        let mut app = test_app_with_items(&["a"]);
        let mut tui = TuiState::new();

        assert_eq!(send(&mut app, &mut tui, &[TuiEvent::InputChar('q')]), Effect::None);
        assert_eq!(app.input.text(), "q");

        let effect = send(&mut app, &mut tui, &[TuiEvent::FocusNext, TuiEvent::InputChar('q')]);
        assert_eq!(effect, Effect::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(send(&mut app, &mut tui, &[TuiEvent::ForceQuit]), Effect::Quit);
        tui.focus = Focus::List;
        assert_eq!(send(&mut app, &mut tui, &[TuiEvent::ForceQuit]), Effect::Quit);
    }

    #[test]
    fn test_list_navigation_and_toggle() {
        let mut app = test_app_with_items(&["a", "b", "c"]);
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::FocusNext]);
        assert_eq!(tui.focus, Focus::List);
        assert_eq!(tui.item_list.selected, Some(ItemKey(1)));

        send(&mut app, &mut tui, &[TuiEvent::CursorDown, TuiEvent::InputChar(' ')]);
        assert!(app.store.get(ItemKey(2)).unwrap().done);

        send(&mut app, &mut tui, &[TuiEvent::InputChar('x')]);
        assert!(!app.store.get(ItemKey(2)).unwrap().done);

        send(&mut app, &mut tui, &[TuiEvent::InputChar('j'), TuiEvent::InputChar('j')]);
        assert_eq!(tui.item_list.selected, Some(ItemKey(3)));
        send(&mut app, &mut tui, &[TuiEvent::CursorHome]);
        assert_eq!(tui.item_list.selected, Some(ItemKey(1)));
    }

    #[test]
    fn test_edit_commits_draft_on_enter() {
        let mut app = test_app_with_items(&["buy milk"]);
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::FocusNext, TuiEvent::Submit]);
        assert!(app.edits.is_editing(ItemKey(1)));

        send(&mut app, &mut tui, &[TuiEvent::CursorHome]);
        type_text(&mut app, &mut tui, "oat ");
        assert_eq!(app.edits.draft(ItemKey(1)).unwrap().text(), "oat buy milk");
        // Store untouched until confirmed
        assert_eq!(app.store.items()[0].content, "buy milk");

        send(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert!(!app.edits.is_editing(ItemKey(1)));
        assert_eq!(app.store.items()[0].content, "oat buy milk");
    }

    #[test]
    fn test_space_and_d_go_to_draft_while_editing() {
        let mut app = test_app_with_items(&["a"]);
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::FocusNext, TuiEvent::InputChar('e')]);
        send(&mut app, &mut tui, &[TuiEvent::InputChar(' '), TuiEvent::InputChar('d')]);

        assert_eq!(app.store.len(), 1);
        assert!(!app.store.items()[0].done);
        assert_eq!(app.edits.draft(ItemKey(1)).unwrap().text(), "a d");
    }

    #[test]
    fn test_escape_cancels_only_when_enabled() {
        let mut app = test_app_with_items(&["a"]);
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::FocusNext, TuiEvent::Submit]);
        type_text(&mut app, &mut tui, "bc");
        send(&mut app, &mut tui, &[TuiEvent::Escape]);
        assert!(app.edits.is_editing(ItemKey(1)));

        app.allow_cancel_edit = true;
        send(&mut app, &mut tui, &[TuiEvent::Escape]);
        assert!(!app.edits.is_editing(ItemKey(1)));
        assert_eq!(app.store.items()[0].content, "a");
    }

    #[test]
    fn test_delete_moves_selection_to_next() {
        let mut app = test_app_with_items(&["a", "b", "c"]);
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::FocusNext, TuiEvent::CursorDown]);
        send(&mut app, &mut tui, &[TuiEvent::InputChar('d')]);

        let keys: Vec<ItemKey> = app.store.items().iter().map(|i| i.key).collect();
        assert_eq!(keys, vec![ItemKey(1), ItemKey(3)]);
        assert_eq!(tui.item_list.selected, Some(ItemKey(3)));
        assert_eq!(app.status_message, "Deleted #2");
    }

    #[test]
    fn test_other_letter_in_list_switches_to_input() {
        let mut app = test_app_with_items(&["a"]);
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::FocusNext, TuiEvent::InputChar('m')]);
        assert_eq!(tui.focus, Focus::Input);
        assert_eq!(app.input.text(), "m");
    }

    #[test]
    fn test_click_row_buttons() {
        let mut app = test_app_with_items(&["buy milk", "walk dog"]);
        let mut tui = TuiState::new();
        let terminal = draw(&app, &mut tui);

        // Second card's text line: list border at y=4, cards at 5..=7 and 8..=10
        let line = row_text(&terminal, 9);
        let checkbox = column_of(&line, "[ ]").unwrap();
        send(&mut app, &mut tui, &[TuiEvent::MouseClick(checkbox + 1, 9)]);
        assert!(app.store.get(ItemKey(2)).unwrap().done);
        assert_eq!(tui.focus, Focus::List);
        assert_eq!(tui.item_list.selected, Some(ItemKey(2)));

        let delete = column_of(&line, "[Delete]").unwrap();
        send(&mut app, &mut tui, &[TuiEvent::MouseClick(delete + 2, 9)]);
        assert_eq!(app.store.len(), 1);
        assert_eq!(tui.item_list.selected, Some(ItemKey(1)));
    }

    #[test]
    fn test_click_edit_then_save() {
        let mut app = test_app_with_items(&["buy milk"]);
        let mut tui = TuiState::new();
        let terminal = draw(&app, &mut tui);

        let edit = column_of(&row_text(&terminal, 6), "[Edit]").unwrap();
        send(&mut app, &mut tui, &[TuiEvent::MouseClick(edit + 1, 6)]);
        assert!(app.edits.is_editing(ItemKey(1)));

        type_text(&mut app, &mut tui, "!");
        let terminal = draw(&app, &mut tui);
        let save = column_of(&row_text(&terminal, 6), "[Save]").unwrap();
        send(&mut app, &mut tui, &[TuiEvent::MouseClick(save + 1, 6)]);

        assert!(!app.edits.is_editing(ItemKey(1)));
        assert_eq!(app.store.items()[0].content, "buy milk!");
    }

    #[test]
    fn test_click_add_button_submits() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        draw(&app, &mut tui);

        type_text(&mut app, &mut tui, "walk dog");
        let button = tui.input_layout.add_button;
        send(&mut app, &mut tui, &[TuiEvent::MouseClick(button.x, button.y)]);

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.items()[0].content, "walk dog");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_click_outside_everything_is_ignored() {
        let mut app = test_app_with_items(&["a"]);
        let mut tui = TuiState::new();
        draw(&app, &mut tui);

        assert_eq!(send(&mut app, &mut tui, &[TuiEvent::MouseClick(5, 0)]), Effect::None);
        assert_eq!(app.store.items()[0].content, "a");
        assert_eq!(tui.focus, Focus::Input);
    }

    #[test]
    fn test_every_event_is_drawn_before_the_next() {
        let mut app = test_app_with_items(&["a", "b"]);
        let mut tui = TuiState::new();
        let mut draws = 0;
        let events = [
            TuiEvent::FocusNext,
            TuiEvent::CursorDown,
            TuiEvent::InputChar(' '),
        ];

        for event in events {
            let effect = apply_and_draw(&mut app, &mut tui, event, |_, _| {
                draws += 1;
                Ok::<(), ()>(())
            });
            assert_eq!(effect, Ok(Effect::None));
        }
        assert_eq!(draws, 3);

        let effect = apply_and_draw(&mut app, &mut tui, TuiEvent::InputChar('q'), |_, _| {
            draws += 1;
            Ok::<(), ()>(())
        });
        assert_eq!(effect, Ok(Effect::Quit));
        assert_eq!(draws, 3);
    }

    #[test]
    fn test_second_click_hits_the_redrawn_row() {
        let mut app = test_app_with_items(&["buy milk"]);
        let mut tui = TuiState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)).unwrap();

        let edit = column_of(&row_text(&terminal, 6), "[Edit]").unwrap();
        apply_and_draw(&mut app, &mut tui, TuiEvent::MouseClick(edit + 1, 6), |app, tui| {
            terminal.draw(|f| ui::draw_ui(f, app, tui)).map(|_| ())
        })
        .unwrap();
        assert_eq!(tui.item_list.layout.rows[0].mode, ItemMode::Editing);

        // [Save] now sits where [Delete] was drawn before the first click
        let save = column_of(&row_text(&terminal, 6), "[Save]").unwrap();
        apply_and_draw(&mut app, &mut tui, TuiEvent::MouseClick(save + 1, 6), |app, tui| {
            terminal.draw(|f| ui::draw_ui(f, app, tui)).map(|_| ())
        })
        .unwrap();

        assert!(!app.edits.is_editing(ItemKey(1)));
        assert_eq!(app.store.len(), 1);
        assert!(row_text(&terminal, 6).contains("[Edit]"));
    }

    #[test]
    fn test_status_message_lasts_one_event() {
        let mut app = test_app_with_items(&["a", "b"]);
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &[TuiEvent::FocusNext, TuiEvent::InputChar('d')]);
        assert_eq!(app.status_message, "Deleted #1");

        send(&mut app, &mut tui, &[TuiEvent::Resize]);
        assert_eq!(app.status_message, "Deleted #1");

        send(&mut app, &mut tui, &[TuiEvent::CursorDown]);
        assert!(app.status_message.is_empty());
    }
}
