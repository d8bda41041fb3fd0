//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::core::config::{DisclosureMode, Layout, ReconnectPolicy, ScreenSpec};
use crate::core::navigation::{Navigator, Route, StackNavigator};
use crate::core::record::{RecordView, default_display_keys};
use crate::core::state::App;

/// Raw upstream planet records with a couple of non-string fields.
pub fn planet_values(names: &[&str]) -> Vec<Value> {
    names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "climate": "arid",
                "residents": ["https://swapi.dev/api/people/1/"],
            })
        })
        .collect()
}

pub fn record(name: &str) -> RecordView {
    RecordView::from_value(&json!({ "name": name }), &default_display_keys())
}

pub fn records(names: &[&str]) -> Vec<RecordView> {
    names.iter().map(|n| record(n)).collect()
}

pub fn screen_spec(title: &str, disclosure: DisclosureMode, gate: bool) -> ScreenSpec {
    ScreenSpec {
        title: title.to_string(),
        url: format!("http://localhost/api/{}/", title.to_lowercase()),
        display_keys: default_display_keys(),
        disclosure,
        connectivity_gate: gate,
        unmount_on_blur: false,
    }
}

fn default_specs() -> Vec<ScreenSpec> {
    vec![
        screen_spec("Planets", DisclosureMode::Modal, true),
        screen_spec("Films", DisclosureMode::Navigate, false),
        screen_spec("Starships", DisclosureMode::Navigate, false),
    ]
}

/// Navigator that remembers every route pushed onto it.
pub struct RecordingNavigator {
    inner: StackNavigator,
    pub pushed: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new(start_screen: usize) -> Self {
        Self {
            inner: StackNavigator::new(start_screen),
            pushed: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route) {
        if let Ok(mut pushed) = self.pushed.lock() {
            pushed.push(route.clone());
        }
        self.inner.navigate(route);
    }

    fn back(&mut self) -> bool {
        self.inner.back()
    }

    fn reset(&mut self, screen: usize) {
        self.inner.reset(screen);
    }

    fn current(&self) -> &Route {
        self.inner.current()
    }
}

/// Creates a test App with the default three screens and a stack navigator.
pub fn test_app() -> App {
    App::new(
        default_specs(),
        0,
        ReconnectPolicy::IfEmpty,
        Layout::Tabs,
        Box::new(StackNavigator::new(0)),
    )
}

/// Creates a test App where every screen uses `disclosure`, plus the log of
/// routes pushed onto its navigator.
pub fn test_app_with(disclosure: DisclosureMode) -> (App, Arc<Mutex<Vec<Route>>>) {
    let specs = default_specs()
        .into_iter()
        .map(|spec| ScreenSpec { disclosure, ..spec })
        .collect();
    let navigator = RecordingNavigator::new(0);
    let pushed = navigator.pushed.clone();
    let app = App::new(
        specs,
        0,
        ReconnectPolicy::IfEmpty,
        Layout::Tabs,
        Box::new(navigator),
    );
    (app, pushed)
}
