//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as struct fields:
//! - `ScreenBar`: tab strip or drawer listing the screens
//! - `SearchBox`: the active screen's search text
//! - `StatusBar`: counts, load time and connectivity
//! - `RecordModal`: in-place disclosure overlay
//! - `OfflineNotice`: shown instead of a gated list while offline
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state in `TuiState` and are wrapped
//! per frame:
//! - `RecordList`: the filtered rows with swipe-to-reveal Open actions
//! - `DetailView`: scrollable label/value rows for one record
//!
//! Components receive external data as props, not by reading global state,
//! so each one can be rendered against a `TestBackend` in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── screen_bar.rs     (tabs / drawer)
//! ├── search_box.rs
//! ├── record_list.rs    (list + swipe)
//! ├── record_modal.rs
//! ├── detail_view.rs
//! ├── offline_notice.rs
//! └── status_bar.rs
//! ```

pub mod detail_view;
pub mod offline_notice;
pub mod record_list;
pub mod record_modal;
pub mod screen_bar;
pub mod search_box;
pub mod status_bar;

pub use detail_view::{DetailView, DetailViewState};
pub use offline_notice::OfflineNotice;
pub use record_list::{RecordList, RecordListEvent, RecordListState};
pub use record_modal::RecordModal;
pub use screen_bar::ScreenBar;
pub use search_box::SearchBox;
pub use status_bar::StatusBar;

use ratatui::layout::{Constraint, Layout, Rect};

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
