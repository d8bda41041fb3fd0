//! # Remote List Controller
//!
//! One list screen: fetch lifecycle, live search, disclosure and the
//! optional connectivity gate. Planets, Films and Starships are all the
//! same controller with a different `ScreenSpec`.
//!
//! ```text
//!   Unmounted ──activate()──▶ Mounted ──teardown()──▶ Unmounted
//!                               │
//!                 gated+offline │ otherwise
//!                  (deferred) ◀─┴─▶ FetchTicket { epoch } ──▶ complete_fetch(epoch, ..)
//! ```
//!
//! Every fetch carries the epoch it was issued under. Teardown and newer
//! fetches bump the epoch, so a completion that arrives late is dropped
//! instead of writing into a screen that has moved on.

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use serde_json::Value;

use crate::core::config::{DisclosureMode, ReconnectPolicy, ScreenSpec};
use crate::core::filter::{VisibleRow, filter_records};
use crate::core::record::{RecordView, normalize_all};
use crate::remote::SourceError;

/// Per-mount view state. Discarded on teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub items: Vec<RecordView>,
    pub search_text: String,
    pub is_connected: bool,
    /// Index into `items` of the record being disclosed.
    pub selected: Option<usize>,
    pub detail_visible: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_text: String::new(),
            is_connected: true,
            selected: None,
            detail_visible: false,
        }
    }
}

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub screen: usize,
    pub epoch: u64,
    pub url: String,
}

/// Outcome of activating a row's Open action.
#[derive(Debug, Clone, PartialEq)]
pub enum Disclosure {
    /// The in-place modal is now showing.
    Modal,
    /// The caller should navigate to a detail screen for this record.
    Navigate(RecordView),
    /// Nothing to open (bad index, or gated behind the offline notice).
    Ignored,
}

pub struct ListController {
    pub index: usize,
    pub spec: ScreenSpec,
    pub state: ListState,
    reconnect: ReconnectPolicy,
    mounted: bool,
    epoch: u64,
    in_flight: bool,
    deferred: bool,
    loaded_at: Option<DateTime<Local>>,
}

impl ListController {
    pub fn new(index: usize, spec: ScreenSpec, reconnect: ReconnectPolicy) -> Self {
        Self {
            index,
            spec,
            state: ListState::default(),
            reconnect,
            mounted: false,
            epoch: 0,
            in_flight: false,
            deferred: false,
            loaded_at: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    /// True while the gate hides the list behind the offline notice.
    pub fn shows_offline_notice(&self) -> bool {
        self.spec.connectivity_gate && !self.state.is_connected
    }

    /// First display. Issues the one fetch for this mount, unless the gate
    /// is closed, in which case the fetch waits for reconnection.
    pub fn activate(&mut self, connected: bool) -> Option<FetchTicket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.state = ListState {
            is_connected: connected,
            ..ListState::default()
        };
        info!("Mounted screen '{}'", self.spec.title);

        if self.shows_offline_notice() {
            info!("Screen '{}' is offline, deferring fetch", self.spec.title);
            self.deferred = true;
            return None;
        }
        Some(self.begin_fetch())
    }

    /// Unmount: drop all view state and invalidate any fetch in flight.
    /// Returns true if a fetch was in flight and should be aborted.
    pub fn teardown(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let was_in_flight = self.in_flight;
        self.mounted = false;
        self.epoch += 1;
        self.in_flight = false;
        self.deferred = false;
        self.loaded_at = None;
        self.state = ListState::default();
        info!(
            "Unmounted screen '{}' (fetch in flight: {})",
            self.spec.title, was_in_flight
        );
        was_in_flight
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.in_flight = true;
        debug!(
            "Fetch for '{}' issued (epoch {})",
            self.spec.title, self.epoch
        );
        FetchTicket {
            screen: self.index,
            epoch: self.epoch,
            url: self.spec.url.clone(),
        }
    }

    /// Apply a fetch result. Stale epochs and unmounted screens are ignored.
    /// Returns true if the result was applied.
    pub fn complete_fetch(&mut self, epoch: u64, result: Result<Vec<Value>, SourceError>) -> bool {
        if !self.mounted || epoch != self.epoch {
            debug!(
                "Dropping stale fetch for '{}' (epoch {}, current {}, mounted {})",
                self.spec.title, epoch, self.epoch, self.mounted
            );
            return false;
        }
        self.in_flight = false;

        match result {
            Ok(values) => {
                self.state.items = normalize_all(&values, &self.spec.display_keys);
                self.loaded_at = Some(Local::now());
                if self
                    .state
                    .selected
                    .is_some_and(|i| i >= self.state.items.len())
                {
                    self.state.selected = None;
                    self.state.detail_visible = false;
                }
                info!(
                    "Screen '{}' loaded {} items",
                    self.spec.title,
                    self.state.items.len()
                );
            }
            Err(e) => {
                warn!("Fetch for '{}' failed: {}", self.spec.title, e);
            }
        }
        true
    }

    /// Record a connectivity transition. May ask for a fetch on reconnect.
    pub fn set_connected(&mut self, connected: bool) -> Option<FetchTicket> {
        let was_connected = self.state.is_connected;
        self.state.is_connected = connected;

        if !self.mounted || !self.spec.connectivity_gate || was_connected || !connected {
            return None;
        }

        if self.deferred {
            self.deferred = false;
            info!("Screen '{}' back online, running deferred fetch", self.spec.title);
            return Some(self.begin_fetch());
        }

        let refetch = !self.in_flight
            && match self.reconnect {
                ReconnectPolicy::Never => false,
                ReconnectPolicy::IfEmpty => self.state.items.is_empty(),
                ReconnectPolicy::Always => true,
            };
        if refetch {
            info!("Screen '{}' back online, refetching", self.spec.title);
            return Some(self.begin_fetch());
        }
        None
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.state.search_text.push(c);
    }

    /// Append pasted text. Line breaks and other control characters are dropped.
    pub fn push_search_str(&mut self, text: &str) {
        self.state
            .search_text
            .extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn pop_search_char(&mut self) {
        self.state.search_text.pop();
    }

    /// The filtered list. Recomputed on every call.
    pub fn visible(&self) -> Vec<VisibleRow<'_>> {
        filter_records(&self.state.items, &self.state.search_text)
    }

    /// Activate the Open action on a record (index into `items`).
    pub fn open(&mut self, item_index: usize) -> Disclosure {
        if self.shows_offline_notice() {
            return Disclosure::Ignored;
        }
        let Some(record) = self.state.items.get(item_index) else {
            return Disclosure::Ignored;
        };
        self.state.selected = Some(item_index);

        match self.spec.disclosure {
            DisclosureMode::Modal => {
                self.state.detail_visible = true;
                Disclosure::Modal
            }
            DisclosureMode::Navigate => Disclosure::Navigate(record.clone()),
        }
    }

    pub fn close_detail(&mut self) {
        self.state.detail_visible = false;
        self.state.selected = None;
    }

    /// Text shown in the modal, when it's open.
    pub fn modal_text(&self) -> Option<&str> {
        if !self.state.detail_visible {
            return None;
        }
        self.state
            .selected
            .and_then(|i| self.state.items.get(i))
            .map(|r| r.display.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{planet_values, screen_spec};

    fn controller(disclosure: DisclosureMode, gate: bool) -> ListController {
        ListController::new(0, screen_spec("Planets", disclosure, gate), ReconnectPolicy::IfEmpty)
    }

    fn loaded(disclosure: DisclosureMode, gate: bool) -> ListController {
        let mut c = controller(disclosure, gate);
        let ticket = c.activate(true).unwrap();
        assert!(c.complete_fetch(ticket.epoch, Ok(planet_values(&["Tatooine", "Alderaan"]))));
        c
    }

    fn displays(c: &ListController) -> Vec<String> {
        c.visible().iter().map(|r| r.record.display.clone()).collect()
    }

    #[test]
    fn test_activate_issues_exactly_one_fetch() {
        let mut c = controller(DisclosureMode::Modal, false);
        let ticket = c.activate(true).unwrap();
        assert_eq!(ticket.screen, 0);
        assert_eq!(ticket.url, c.spec.url);
        assert!(c.is_loading());
        assert!(c.activate(true).is_none());
    }

    #[test]
    fn test_fetch_then_search() {
        let mut c = loaded(DisclosureMode::Modal, false);
        assert_eq!(displays(&c), vec!["Tatooine", "Alderaan"]);

        c.set_search("tat");
        assert_eq!(displays(&c), vec!["Tatooine"]);

        c.set_search("");
        assert_eq!(displays(&c), vec!["Tatooine", "Alderaan"]);
    }

    #[test]
    fn test_search_keystrokes() {
        let mut c = loaded(DisclosureMode::Modal, false);
        c.push_search_char('A');
        c.push_search_char('l');
        assert_eq!(displays(&c), vec!["Alderaan"]);
        c.pop_search_char();
        assert_eq!(displays(&c), vec!["Tatooine", "Alderaan"]);
    }

    #[test]
    fn test_pasted_search_drops_line_breaks() {
        let mut c = loaded(DisclosureMode::Modal, false);
        c.push_search_str("alder\r\naan");
        assert_eq!(c.state.search_text, "alderaan");
        assert_eq!(displays(&c), vec!["Alderaan"]);
    }

    #[test]
    fn test_fetch_failure_leaves_empty_list() {
        let mut c = controller(DisclosureMode::Modal, false);
        let ticket = c.activate(true).unwrap();
        assert!(c.complete_fetch(ticket.epoch, Err(SourceError::Network("refused".into()))));
        assert!(c.state.items.is_empty());
        assert!(c.visible().is_empty());
        assert!(!c.is_loading());
    }

    #[test]
    fn test_refetch_replaces_items() {
        let mut c = loaded(DisclosureMode::Modal, false);
        c.teardown();
        let ticket = c.activate(true).unwrap();
        c.complete_fetch(ticket.epoch, Ok(planet_values(&["Hoth"])));
        assert_eq!(displays(&c), vec!["Hoth"]);
    }

    #[test]
    fn test_late_completion_after_teardown_is_ignored() {
        let mut c = controller(DisclosureMode::Modal, false);
        let ticket = c.activate(true).unwrap();
        assert!(c.teardown());
        assert!(!c.complete_fetch(ticket.epoch, Ok(planet_values(&["Tatooine"]))));
        assert!(c.state.items.is_empty());
    }

    #[test]
    fn test_completion_from_previous_mount_is_ignored() {
        let mut c = controller(DisclosureMode::Modal, false);
        let old = c.activate(true).unwrap();
        c.teardown();
        let new = c.activate(true).unwrap();
        assert!(!c.complete_fetch(old.epoch, Ok(planet_values(&["Stale"]))));
        assert!(c.complete_fetch(new.epoch, Ok(planet_values(&["Fresh"]))));
        assert_eq!(displays(&c), vec!["Fresh"]);
    }

    #[test]
    fn test_open_modal_and_close_preserves_list() {
        let mut c = loaded(DisclosureMode::Modal, false);
        c.set_search("a");
        let before_items = c.state.items.clone();

        assert_eq!(c.open(1), Disclosure::Modal);
        assert_eq!(c.modal_text(), Some("Alderaan"));
        assert!(c.state.detail_visible);

        c.close_detail();
        assert_eq!(c.modal_text(), None);
        assert!(!c.state.detail_visible);
        assert_eq!(c.state.items, before_items);
        assert_eq!(c.state.search_text, "a");
    }

    #[test]
    fn test_open_navigate_returns_record() {
        let mut c = loaded(DisclosureMode::Navigate, false);
        match c.open(0) {
            Disclosure::Navigate(record) => assert_eq!(record.display, "Tatooine"),
            other => panic!("expected navigation, got {other:?}"),
        }
        assert!(!c.state.detail_visible);
    }

    #[test]
    fn test_open_out_of_range_is_ignored() {
        let mut c = loaded(DisclosureMode::Modal, false);
        assert_eq!(c.open(7), Disclosure::Ignored);
        assert!(!c.state.detail_visible);
    }

    #[test]
    fn test_gated_activation_while_offline_defers_fetch() {
        let mut c = controller(DisclosureMode::Modal, true);
        assert!(c.activate(false).is_none());
        assert!(c.shows_offline_notice());

        let ticket = c.set_connected(true).unwrap();
        assert!(!c.shows_offline_notice());
        assert!(c.complete_fetch(ticket.epoch, Ok(planet_values(&["Naboo"]))));
        assert_eq!(displays(&c), vec!["Naboo"]);
    }

    #[test]
    fn test_going_offline_keeps_items() {
        let mut c = loaded(DisclosureMode::Modal, true);
        assert!(c.set_connected(false).is_none());
        assert!(c.shows_offline_notice());
        assert_eq!(c.state.items.len(), 2);
        assert_eq!(c.open(0), Disclosure::Ignored);
    }

    #[test]
    fn test_reconnect_policy_if_empty() {
        let mut c = loaded(DisclosureMode::Modal, true);
        c.set_connected(false);
        // Items already loaded: no refetch
        assert!(c.set_connected(true).is_none());

        let mut empty = controller(DisclosureMode::Modal, true);
        let ticket = empty.activate(true).unwrap();
        empty.complete_fetch(ticket.epoch, Err(SourceError::Network("down".into())));
        empty.set_connected(false);
        assert!(empty.set_connected(true).is_some());
    }

    #[test]
    fn test_reconnect_policy_always_and_never() {
        let spec = screen_spec("Planets", DisclosureMode::Modal, true);
        let mut always = ListController::new(0, spec.clone(), ReconnectPolicy::Always);
        let t = always.activate(true).unwrap();
        always.complete_fetch(t.epoch, Ok(planet_values(&["Tatooine"])));
        always.set_connected(false);
        assert!(always.set_connected(true).is_some());

        let mut never = ListController::new(0, spec, ReconnectPolicy::Never);
        never.activate(true);
        never.set_connected(false);
        assert!(never.set_connected(true).is_none());
    }

    #[test]
    fn test_ungated_screen_ignores_connectivity() {
        let mut c = loaded(DisclosureMode::Modal, false);
        assert!(c.set_connected(false).is_none());
        assert!(!c.shows_offline_notice());
        assert!(c.set_connected(true).is_none());
    }

    #[test]
    fn test_refetch_clears_out_of_range_selection() {
        let spec = screen_spec("Planets", DisclosureMode::Modal, true);
        let mut c = ListController::new(0, spec, ReconnectPolicy::Always);
        let t = c.activate(true).unwrap();
        c.complete_fetch(t.epoch, Ok(planet_values(&["A", "B", "C"])));
        c.open(2);
        c.set_connected(false);
        let t = c.set_connected(true).unwrap();
        c.complete_fetch(t.epoch, Ok(planet_values(&["A"])));
        assert_eq!(c.state.selected, None);
        assert_eq!(c.modal_text(), None);
    }
}
