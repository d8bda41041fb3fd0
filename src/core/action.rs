//! # Actions
//!
//! Everything that can happen in Holocron becomes an `Action`.
//! User types into the search box? That's `Action::SearchInput(c)`.
//! The API responds? That's `Action::FetchSucceeded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the side effects the adapter must perform. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Effect>
//! ```

use log::{debug, info};
use serde_json::Value;

use crate::core::controller::{Disclosure, FetchTicket};
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::remote::SourceError;

/// Which screen to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTarget {
    Next,
    Prev,
    Index(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Mount the active screen (first display).
    Activate,
    SwitchScreen(ScreenTarget),
    SearchInput(char),
    /// Pasted text, appended to the search as a whole.
    SearchAppend(String),
    SearchBackspace,
    SearchClear,
    /// Open action on a row (index into the screen's `items`).
    Open { item_index: usize },
    CloseModal,
    /// Esc: close the modal, or pop the detail screen.
    Back,
    FetchSucceeded {
        screen: usize,
        epoch: u64,
        records: Vec<Value>,
    },
    FetchFailed {
        screen: usize,
        epoch: u64,
        error: SourceError,
    },
    ConnectivityChanged(bool),
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SpawnFetch(FetchTicket),
    /// Abort whatever fetch task is running for this screen.
    CancelFetch(usize),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Activate => activate_current(app),

        Action::SwitchScreen(target) => {
            let count = app.screens.len();
            if count == 0 {
                return Vec::new();
            }
            let next = match target {
                ScreenTarget::Next => (app.active + 1) % count,
                ScreenTarget::Prev => (app.active + count - 1) % count,
                ScreenTarget::Index(i) if i < count => i,
                ScreenTarget::Index(_) => return Vec::new(),
            };
            if next == app.active && !app.is_on_detail() {
                return Vec::new();
            }

            let mut effects = Vec::new();
            let previous = app.active;
            if next != previous
                && let Some(screen) = app.screens.get_mut(previous)
                && screen.spec.unmount_on_blur
                && screen.is_mounted()
            {
                screen.teardown();
                effects.push(Effect::CancelFetch(previous));
            }

            app.active = next;
            app.navigator.reset(next);
            if let Some(title) = app.active_screen().map(|s| s.spec.title.clone()) {
                app.status_message = title;
            }
            effects.extend(activate_current(app));
            effects
        }

        Action::SearchInput(c) => {
            if !app.is_on_detail()
                && let Some(screen) = app.active_screen_mut()
            {
                screen.push_search_char(c);
            }
            Vec::new()
        }

        Action::SearchAppend(text) => {
            if !app.is_on_detail()
                && let Some(screen) = app.active_screen_mut()
            {
                screen.push_search_str(&text);
            }
            Vec::new()
        }

        Action::SearchBackspace => {
            if !app.is_on_detail()
                && let Some(screen) = app.active_screen_mut()
            {
                screen.pop_search_char();
            }
            Vec::new()
        }

        Action::SearchClear => {
            if !app.is_on_detail()
                && let Some(screen) = app.active_screen_mut()
            {
                screen.set_search("");
            }
            Vec::new()
        }

        Action::Open { item_index } => {
            if app.is_on_detail() {
                return Vec::new();
            }
            let active = app.active;
            let Some(screen) = app.screens.get_mut(active) else {
                return Vec::new();
            };
            match screen.open(item_index) {
                Disclosure::Modal => {
                    debug!("Opened modal for item {} on screen {}", item_index, active);
                }
                Disclosure::Navigate(record) => {
                    info!("Navigating to detail for '{}'", record.display);
                    app.navigator.navigate(Route::Detail {
                        screen: active,
                        record,
                    });
                }
                Disclosure::Ignored => {}
            }
            Vec::new()
        }

        Action::CloseModal => {
            if let Some(screen) = app.active_screen_mut() {
                screen.close_detail();
            }
            Vec::new()
        }

        Action::Back => {
            if let Some(screen) = app.active_screen_mut()
                && screen.state.detail_visible
            {
                screen.close_detail();
                return Vec::new();
            }
            if app.navigator.back()
                && let Some(screen) = app.active_screen_mut()
            {
                screen.close_detail();
            }
            Vec::new()
        }

        Action::FetchSucceeded {
            screen,
            epoch,
            records,
        } => {
            let count = records.len();
            if let Some(controller) = app.screens.get_mut(screen)
                && controller.complete_fetch(epoch, Ok(records))
            {
                app.status_message = format!("Loaded {} {}", count, controller.spec.title);
            }
            Vec::new()
        }

        Action::FetchFailed {
            screen,
            epoch,
            error,
        } => {
            // Logged by the controller; the list just stays empty.
            if let Some(controller) = app.screens.get_mut(screen) {
                controller.complete_fetch(epoch, Err(error));
            }
            Vec::new()
        }

        Action::ConnectivityChanged(connected) => {
            if app.is_connected == connected {
                return Vec::new();
            }
            app.is_connected = connected;
            app.status_message = if connected {
                String::from("Back online")
            } else {
                String::from("Offline")
            };
            app.screens
                .iter_mut()
                .filter_map(|screen| screen.set_connected(connected))
                .map(Effect::SpawnFetch)
                .collect()
        }

        Action::Quit => {
            let mut effects: Vec<Effect> = app
                .screens
                .iter_mut()
                .filter_map(|screen| screen.teardown().then_some(Effect::CancelFetch(screen.index)))
                .collect();
            effects.push(Effect::Quit);
            effects
        }
    }
}

fn activate_current(app: &mut App) -> Vec<Effect> {
    let connected = app.is_connected;
    app.active_screen_mut()
        .and_then(|screen| screen.activate(connected))
        .map(Effect::SpawnFetch)
        .into_iter()
        .collect()
}
