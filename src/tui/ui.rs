use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::input_box::INPUT_HEIGHT;
use crate::tui::components::{InputBox, ItemList, TitleBar};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(INPUT_HEIGHT), Min(0)]);
    let [title_area, input_area, list_area] = layout.areas(frame.area());

    TitleBar::new(
        &app.title,
        app.store.len(),
        app.store.done_count(),
        &app.status_message,
    )
    .render(frame, title_area);

    InputBox::new(&app.input, tui.focus == Focus::Input, &mut tui.input_layout)
        .render(frame, input_area);

    ItemList::new(
        &mut tui.item_list,
        &app.store,
        &app.edits,
        tui.focus == Focus::List,
        app.allow_cancel_edit,
    )
    .render(frame, list_area);
}
