//! # RecordList Component
//!
//! The filtered list of one screen, with swipe-to-reveal Open actions.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RecordListState` lives in `TuiState` (one per screen)
//! - `RecordList` is created each frame with borrowed state and rows
//!
//! Row indices here are positions in the *visible* (filtered) list. The
//! caller maps them back to item indices before dispatching `Action::Open`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::filter::VisibleRow;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::gesture::{SwipeOutcome, SwipeTracker};

const OPEN_LABEL: &str = " Open ";
const PAGE_STEP: usize = 10;

/// Events emitted by the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordListEvent {
    /// Open action activated on this visible row.
    Open(usize),
}

/// Persistent state for one screen's list.
pub struct RecordListState {
    pub cursor: usize,
    /// Visible row whose Open action is showing.
    pub revealed: Option<usize>,
    pub swipe: SwipeTracker,
    pub list_state: ListState,
    /// Number of visible rows as of the last sync (prop).
    pub row_count: usize,
    /// Inner list area from the last render, for hit testing.
    pub area: Rect,
}

impl RecordListState {
    pub fn new(swipe_threshold: u16) -> Self {
        Self {
            cursor: 0,
            revealed: None,
            swipe: SwipeTracker::new(swipe_threshold),
            list_state: ListState::default(),
            row_count: 0,
            area: Rect::default(),
        }
    }

    /// Update the row count after filtering, keeping cursor and reveal in range.
    pub fn sync_rows(&mut self, row_count: usize) {
        if row_count != self.row_count {
            self.revealed = None;
            self.swipe.cancel();
        }
        self.row_count = row_count;
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
        self.list_state
            .select(if row_count == 0 { None } else { Some(self.cursor) });
    }

    /// Hide any revealed Open action. The filtered rows are about to change.
    pub fn hide_reveal(&mut self) {
        self.revealed = None;
        self.swipe.cancel();
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.row_count == 0 {
            return;
        }
        let max = self.row_count - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
        self.revealed = None;
        self.list_state.select(Some(self.cursor));
    }

    /// Which visible row (if any) is drawn at screen row `y`.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.area;
        if x < area.x || x >= area.x + area.width || y < area.y || y >= area.y + area.height {
            return None;
        }
        let idx = self.list_state.offset() + (y - area.y) as usize;
        (idx < self.row_count).then_some(idx)
    }
}

impl EventHandler for RecordListState {
    type Event = RecordListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<RecordListEvent> {
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.move_cursor(-1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.move_cursor(1);
                None
            }
            TuiEvent::ScrollPageUp => {
                self.move_cursor(-(PAGE_STEP as isize));
                None
            }
            TuiEvent::ScrollPageDown => {
                self.move_cursor(PAGE_STEP as isize);
                None
            }
            TuiEvent::SwipeRight => {
                if self.row_count > 0 {
                    self.revealed = Some(self.cursor);
                }
                None
            }
            TuiEvent::SwipeLeft => {
                self.revealed = None;
                None
            }
            TuiEvent::Submit => {
                if self.revealed == Some(self.cursor) && self.cursor < self.row_count {
                    self.revealed = None;
                    Some(RecordListEvent::Open(self.cursor))
                } else {
                    None
                }
            }
            TuiEvent::MouseDown(x, y) => {
                if let Some(idx) = self.hit_test(*x, *y) {
                    self.cursor = idx;
                    self.list_state.select(Some(idx));
                    self.swipe.press(idx, *x);
                }
                None
            }
            TuiEvent::MouseDrag(x, _) => {
                self.swipe.drag(*x);
                None
            }
            TuiEvent::MouseUp(_, _) => match self.swipe.release()? {
                SwipeOutcome::Revealed(idx) => {
                    self.revealed = Some(idx);
                    None
                }
                SwipeOutcome::Cancelled(idx) => {
                    if self.revealed == Some(idx) {
                        self.revealed = None;
                    }
                    None
                }
                SwipeOutcome::Tap(idx) if self.revealed == Some(idx) => {
                    self.revealed = None;
                    Some(RecordListEvent::Open(idx))
                }
                SwipeOutcome::Tap(_) => {
                    self.revealed = None;
                    None
                }
            },
            _ => None,
        }
    }
}

/// Transient render wrapper for the record list.
pub struct RecordList<'a> {
    state: &'a mut RecordListState,
    rows: &'a [VisibleRow<'a>],
    title: &'a str,
    loading: bool,
}

impl<'a> RecordList<'a> {
    pub fn new(
        state: &'a mut RecordListState,
        rows: &'a [VisibleRow<'a>],
        title: &'a str,
        loading: bool,
    ) -> Self {
        Self {
            state,
            rows,
            title,
            loading,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title));
        self.state.area = block.inner(area);

        if self.rows.is_empty() {
            let text = if self.loading { "Loading..." } else { "" };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let width = self.state.area.width as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let revealed = self.state.revealed == Some(i);
                let offset = self.state.swipe.offset_for(i) as usize;
                ListItem::new(row_line(&row.record.display, revealed, offset, width))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// One row: optional Open action, drag indent, then the display value.
fn row_line(display: &str, revealed: bool, offset: usize, width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;
    if revealed {
        spans.push(Span::styled(
            OPEN_LABEL,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
        used += OPEN_LABEL.width() + 1;
    } else if offset > 0 {
        spans.push(Span::styled(
            "›".repeat(offset),
            Style::default().fg(Color::Green),
        ));
        used += offset;
    }
    spans.push(Span::raw(truncate_to_width(
        display,
        width.saturating_sub(used),
    )));
    Line::from(spans)
}

/// Truncate to a display width, adding "..." if anything was cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::filter_records;
    use crate::test_support::records;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state_with_rows(n: usize) -> RecordListState {
        let mut state = RecordListState::new(4);
        state.area = Rect::new(1, 1, 30, 10);
        state.sync_rows(n);
        state
    }

    #[test]
    fn test_swipe_right_then_enter_opens() {
        let mut state = state_with_rows(3);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        state.handle_event(&TuiEvent::SwipeRight);
        assert_eq!(state.revealed, Some(1));
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(RecordListEvent::Open(1))
        );
        assert_eq!(state.revealed, None);
    }

    #[test]
    fn test_moving_cursor_hides_reveal() {
        let mut state = state_with_rows(3);
        state.handle_event(&TuiEvent::SwipeRight);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.revealed, None);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_swipe_left_hides() {
        let mut state = state_with_rows(2);
        state.handle_event(&TuiEvent::SwipeRight);
        state.handle_event(&TuiEvent::SwipeLeft);
        assert_eq!(state.revealed, None);
    }

    #[test]
    fn test_cursor_clamped() {
        let mut state = state_with_rows(2);
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.cursor, 1);
        state.handle_event(&TuiEvent::ScrollPageUp);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_sync_rows_clamps_and_resets_reveal() {
        let mut state = state_with_rows(5);
        state.cursor = 4;
        state.handle_event(&TuiEvent::SwipeRight);
        state.sync_rows(2);
        assert_eq!(state.cursor, 1);
        assert_eq!(state.revealed, None);

        state.sync_rows(0);
        assert_eq!(state.list_state.selected(), None);
        assert_eq!(state.handle_event(&TuiEvent::SwipeRight), None);
        assert_eq!(state.revealed, None);
    }

    #[test]
    fn test_mouse_swipe_reveals_then_tap_opens() {
        let mut state = state_with_rows(3);
        // Row 2 of the list is drawn at y = area.y + 2
        state.handle_event(&TuiEvent::MouseDown(5, 3));
        state.handle_event(&TuiEvent::MouseDrag(10, 3));
        assert_eq!(state.handle_event(&TuiEvent::MouseUp(10, 3)), None);
        assert_eq!(state.revealed, Some(2));

        state.handle_event(&TuiEvent::MouseDown(5, 3));
        assert_eq!(
            state.handle_event(&TuiEvent::MouseUp(5, 3)),
            Some(RecordListEvent::Open(2))
        );
    }

    #[test]
    fn test_mouse_short_swipe_springs_back() {
        let mut state = state_with_rows(3);
        state.handle_event(&TuiEvent::MouseDown(5, 1));
        state.handle_event(&TuiEvent::MouseDrag(7, 1));
        state.handle_event(&TuiEvent::MouseUp(7, 1));
        assert_eq!(state.revealed, None);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_hit_test_outside_rows() {
        let state = state_with_rows(2);
        assert_eq!(state.hit_test(5, 0), None);
        assert_eq!(state.hit_test(5, 1), Some(0));
        assert_eq!(state.hit_test(5, 5), None);
        assert_eq!(state.hit_test(40, 1), None);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Tatooine", 20), "Tatooine");
        assert_eq!(truncate_to_width("Millennium Falcon", 10), "Millenn...");
        assert_eq!(truncate_to_width("Falcon", 2), "..");
    }

    #[test]
    fn test_render_shows_open_action() {
        let items = records(&["Tatooine", "Alderaan"]);
        let rows = filter_records(&items, "");
        let mut state = RecordListState::new(4);
        state.sync_rows(rows.len());
        state.handle_event(&TuiEvent::SwipeRight);

        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| RecordList::new(&mut state, &rows, "Planets", false).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let line: String = (0..40u16).map(|x| buffer[(x, 1u16)].symbol().to_string()).collect();
        assert!(line.contains("Open"), "row was {line:?}");
        assert!(line.contains("Tatooine"));
        assert_eq!(state.area, Rect::new(1, 1, 38, 4));
    }
}
