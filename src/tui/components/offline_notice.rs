use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::component::Component;

pub const OFFLINE_TEXT: &str =
    "You are offline.\nThis list will come back once the connection is restored.";

/// Static notice shown in place of a gated list while offline.
pub struct OfflineNotice;

impl Component for OfflineNotice {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Offline ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Vertically center the two lines
        let top = inner.y + inner.height.saturating_sub(2) / 2;
        let text_area = Rect::new(inner.x, top, inner.width, inner.height.min(2));
        let notice = Paragraph::new(OFFLINE_TEXT)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(notice, text_area);
    }
}
