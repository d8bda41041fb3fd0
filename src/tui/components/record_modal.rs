//! # Record Modal
//!
//! In-place disclosure: a small overlay showing the opened record's display
//! value. Closing it leaves the list underneath untouched.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use super::centered_rect;
use crate::tui::component::Component;

pub struct RecordModal {
    pub text: String,
}

impl RecordModal {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Component for RecordModal {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Open ")
            .title_bottom(Line::from(" Enter/Esc Close ").centered())
            .padding(Padding::uniform(1));

        let body = Paragraph::new(self.text.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}
