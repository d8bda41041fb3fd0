//! # ScreenBar Component
//!
//! Lists the registered screens and highlights the active one. Renders as a
//! tab strip across the top or as a drawer down the left, depending on
//! `Layout`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Tabs};

use crate::core::config::Layout;
use crate::tui::component::Component;

/// Width of the drawer panel in columns.
pub const DRAWER_WIDTH: u16 = 18;

/// Stateless screen switcher.
pub struct ScreenBar {
    pub titles: Vec<String>,
    pub active: usize,
    pub layout: Layout,
}

impl ScreenBar {
    pub fn new(titles: Vec<String>, active: usize, layout: Layout) -> Self {
        Self {
            titles,
            active,
            layout,
        }
    }

    /// Title with its Alt+N shortcut, e.g. "1 Planets".
    fn label(index: usize, title: &str) -> String {
        if index < 9 {
            format!("{} {}", index + 1, title)
        } else {
            title.to_string()
        }
    }
}

impl Component for ScreenBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let highlight = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        match self.layout {
            Layout::Tabs => {
                let titles: Vec<Line> = self
                    .titles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| Line::from(Self::label(i, t)))
                    .collect();
                let tabs = Tabs::new(titles)
                    .select(self.active)
                    .style(Style::default().fg(Color::Gray))
                    .highlight_style(highlight)
                    .divider("│");
                frame.render_widget(tabs, area);
            }
            Layout::Drawer => {
                let items: Vec<ListItem> = self
                    .titles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| ListItem::new(Self::label(i, t)))
                    .collect();
                let list = List::new(items)
                    .block(
                        Block::default()
                            .borders(Borders::RIGHT)
                            .border_style(Style::default().fg(Color::DarkGray))
                            .title(" Holocron "),
                    )
                    .style(Style::default().fg(Color::Gray))
                    .highlight_style(highlight)
                    .highlight_symbol("▸ ");
                let mut state = ListState::default().with_selected(Some(self.active));
                frame.render_stateful_widget(list, area, &mut state);
            }
        }
    }
}
