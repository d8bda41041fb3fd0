use ratatui::Frame;
use ratatui::layout::{Constraint, Layout as Split, Rect};

use crate::core::config::Layout;
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::screen_bar::DRAWER_WIDTH;
use crate::tui::components::{
    DetailView, OfflineNotice, RecordList, RecordModal, ScreenBar, SearchBox, StatusBar,
};

const LIST_HINTS: &str = "↑↓ move  → swipe  Enter open  Tab screen  Esc clear/quit ";
const DETAIL_HINTS: &str = "↑↓ scroll  Esc back ";

/// Split the frame into (screen bar, content).
fn frame_areas(area: Rect, layout: Layout) -> (Rect, Rect) {
    use Constraint::{Length, Min};
    match layout {
        Layout::Tabs => {
            let [bar, content] = Split::vertical([Length(1), Min(0)]).areas(area);
            (bar, content)
        }
        Layout::Drawer => {
            let [bar, content] = Split::horizontal([Length(DRAWER_WIDTH), Min(0)]).areas(area);
            (bar, content)
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let (bar_area, content_area) = frame_areas(frame.area(), app.layout);
    let titles = app.screen_titles().iter().map(|t| t.to_string()).collect();
    ScreenBar::new(titles, app.active, app.layout).render(frame, bar_area);

    let Some(screen) = app.active_screen() else {
        return;
    };

    let [main_area, status_area] = Split::vertical([Min(0), Length(1)]).areas(content_area);

    let rows = screen.visible();
    let hints = match app.navigator.current() {
        Route::Detail { record, .. } => {
            DetailView::new(&mut tui.detail, record).render(frame, main_area);
            DETAIL_HINTS
        }
        Route::List(_) => {
            let [search_area, list_area] = Split::vertical([Length(3), Min(0)]).areas(main_area);
            let modal = screen.modal_text();
            SearchBox::new(screen.state.search_text.clone(), modal.is_none())
                .render(frame, search_area);

            if screen.shows_offline_notice() {
                OfflineNotice.render(frame, list_area);
            } else if let Some(list_state) = tui.lists.get_mut(app.active) {
                list_state.sync_rows(rows.len());
                RecordList::new(list_state, &rows, &screen.spec.title, screen.is_loading())
                    .render(frame, list_area);
            }

            if let Some(text) = modal {
                RecordModal::new(text).render(frame, main_area);
            }
            LIST_HINTS
        }
    };

    StatusBar {
        screen_title: screen.spec.title.clone(),
        status_message: app.status_message.clone(),
        visible_count: rows.len(),
        total_count: screen.state.items.len(),
        loading: screen.is_loading(),
        loaded_at: screen.loaded_at(),
        is_connected: app.is_connected,
        hints,
    }
    .render(frame, status_area);
}
