//! # SearchBox Component
//!
//! Shows the active screen's search text. The text itself lives in the
//! core `ListState`; this component only draws it, so the filter and the
//! box can never disagree.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

pub struct SearchBox {
    pub text: String,
    /// Whether typing currently goes to the search box.
    pub focused: bool,
}

impl SearchBox {
    pub fn new(text: String, focused: bool) -> Self {
        Self { text, focused }
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search ");
        let inner = block.inner(area);

        let line = if self.text.is_empty() {
            Line::from(Span::styled(
                "Type to filter...",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.text.as_str())
        };
        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + (self.text.width() as u16).min(inner.width - 1);
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}
