//! # Application State
//!
//! Core business state for Holocron. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── screens: Vec<ListController>   // one controller per registered screen
//! ├── active: usize                  // screen selected in the tab bar / drawer
//! ├── navigator: Box<dyn Navigator>  // injected routing capability
//! ├── layout: Layout                 // tabs or drawer
//! ├── is_connected: bool             // last connectivity signal
//! └── status_message: String         // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::{Layout, ReconnectPolicy, ResolvedConfig, ScreenSpec};
use crate::core::controller::ListController;
use crate::core::navigation::{Navigator, Route};

pub struct App {
    pub screens: Vec<ListController>,
    pub active: usize,
    pub navigator: Box<dyn Navigator>,
    pub layout: Layout,
    pub is_connected: bool,
    pub status_message: String,
}

impl App {
    pub fn new(
        specs: Vec<ScreenSpec>,
        start_screen: usize,
        reconnect: ReconnectPolicy,
        layout: Layout,
        mut navigator: Box<dyn Navigator>,
    ) -> Self {
        let screens: Vec<ListController> = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| ListController::new(i, spec, reconnect))
            .collect();
        let active = start_screen.min(screens.len().saturating_sub(1));
        navigator.reset(active);

        Self {
            screens,
            active,
            navigator,
            layout,
            is_connected: true,
            status_message: String::from("Welcome to Holocron!"),
        }
    }

    pub fn from_config(config: &ResolvedConfig, navigator: Box<dyn Navigator>) -> Self {
        Self::new(
            config.screens.clone(),
            config.start_screen,
            config.reconnect,
            config.layout,
            navigator,
        )
    }

    pub fn active_screen(&self) -> Option<&ListController> {
        self.screens.get(self.active)
    }

    pub fn active_screen_mut(&mut self) -> Option<&mut ListController> {
        self.screens.get_mut(self.active)
    }

    /// True when a detail screen is on top of the active list.
    pub fn is_on_detail(&self) -> bool {
        matches!(self.navigator.current(), Route::Detail { .. })
    }

    pub fn screen_titles(&self) -> Vec<&str> {
        self.screens.iter().map(|s| s.spec.title.as_str()).collect()
    }
}
