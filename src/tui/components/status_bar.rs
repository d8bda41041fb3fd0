//! # StatusBar Component
//!
//! Bottom line showing where the user is and what the data looks like.
//!
//! ## Conditional Formatting
//!
//! 1. **Loading**: `"Planets | loading..."`
//! 2. **Loaded**: `"Planets | 3/60 shown | loaded 14:02:11 | Loaded 60 Planets"`
//! 3. **Offline**: a trailing `"| OFFLINE"` marker, whatever else is shown
//!
//! Key hints are right-aligned when there's room.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

/// Stateless status line. Every field is a prop.
pub struct StatusBar {
    pub screen_title: String,
    pub status_message: String,
    pub visible_count: usize,
    pub total_count: usize,
    pub loading: bool,
    pub loaded_at: Option<DateTime<Local>>,
    pub is_connected: bool,
    pub hints: &'static str,
}

impl StatusBar {
    /// The left-hand status text.
    pub fn text(&self) -> String {
        let mut parts = vec![self.screen_title.clone()];
        if self.loading {
            parts.push("loading...".to_string());
        } else {
            parts.push(format!("{}/{} shown", self.visible_count, self.total_count));
            if let Some(at) = self.loaded_at {
                parts.push(format!("loaded {}", at.format("%H:%M:%S")));
            }
        }
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        if !self.is_connected {
            parts.push("OFFLINE".to_string());
        }
        parts.join(" | ")
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = self.text();
        let style = if self.is_connected {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        };

        let used = text.chars().count() + self.hints.chars().count();
        let mut spans = vec![Span::styled(text, style)];
        if used < area.width as usize {
            let gap = area.width as usize - used;
            spans.push(Span::raw(" ".repeat(gap)));
            spans.push(Span::styled(self.hints, Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
