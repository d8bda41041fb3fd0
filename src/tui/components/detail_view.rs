//! # Detail View
//!
//! Navigated disclosure: every string field of one record as a label/value
//! row. Long values (film opening crawls) are wrapped and the whole view
//! scrolls.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::record::RecordView;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent scroll state for the detail screen.
#[derive(Default)]
pub struct DetailViewState {
    pub scroll_state: ScrollViewState,
}

impl DetailViewState {
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
    }
}

impl EventHandler for DetailViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

/// Label/value lines for a record, values wrapped to `width` and indented.
pub fn detail_lines(record: &RecordView, width: u16) -> Vec<Line<'static>> {
    let value_width = (width as usize).saturating_sub(2).max(1);
    let mut lines = Vec::new();
    for field in &record.fields {
        lines.push(Line::from(Span::styled(
            field.label.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        // Upstream text uses \r\n line breaks
        let value = field.value.replace("\r\n", "\n");
        for wrapped in textwrap::wrap(&value, value_width) {
            lines.push(Line::from(format!("  {wrapped}")));
        }
    }
    lines
}

/// Transient render wrapper for the detail screen.
pub struct DetailView<'a> {
    state: &'a mut DetailViewState,
    record: &'a RecordView,
}

impl<'a> DetailView<'a> {
    pub fn new(state: &'a mut DetailViewState, record: &'a RecordView) -> Self {
        Self { state, record }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.record.display))
            .title_bottom(Line::from(" Esc Back ").centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // -1 column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let lines = detail_lines(self.record, content_width);
        let height = lines.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, 0, content_width, height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
