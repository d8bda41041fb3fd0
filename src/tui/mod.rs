//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! `update()` never spawns anything itself. It returns `Effect`s, and the
//! loop here turns them into tokio tasks that report back over an mpsc
//! channel. Each screen has at most one fetch task; its `AbortHandle` is
//! kept so a teardown can cancel it.
//!
//! ## Redraw Strategy
//!
//! Draws only when an event or a background action arrived. While any
//! screen is loading, the poll timeout is shortened so results show up
//! promptly.

mod component;
mod components;
mod event;
mod gesture;
mod ui;

use log::{debug, info, warn};
use std::collections::HashMap;
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, ScreenTarget, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller::FetchTicket;
use crate::core::navigation::StackNavigator;
use crate::core::state::App;
use crate::remote::{
    ConnectivityMonitor, HttpSource, ProbeMonitor, RecordSource, StaticMonitor,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{DetailViewState, RecordListEvent, RecordListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Cursor and swipe state, one per screen.
    pub lists: Vec<RecordListState>,
    pub detail: DetailViewState,
}

impl TuiState {
    pub fn new(screen_count: usize, swipe_threshold: u16) -> Self {
        Self {
            lists: (0..screen_count)
                .map(|_| RecordListState::new(swipe_threshold))
                .collect(),
            detail: DetailViewState::default(),
        }
    }

    /// Bring the active list's row count up to date before routing input.
    fn sync(&mut self, app: &App) {
        if let Some(screen) = app.active_screen()
            && let Some(list) = self.lists.get_mut(app.active)
        {
            list.sync_rows(screen.visible().len());
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Turns `Effect`s into tokio tasks, one fetch per screen.
struct FetchRunner {
    source: Arc<dyn RecordSource>,
    tx: mpsc::Sender<Action>,
    handles: HashMap<usize, AbortHandle>,
}

impl FetchRunner {
    fn new(source: Arc<dyn RecordSource>, tx: mpsc::Sender<Action>) -> Self {
        Self {
            source,
            tx,
            handles: HashMap::new(),
        }
    }

    /// Apply effects. Returns true if the app should quit.
    fn apply(&mut self, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            match effect {
                Effect::SpawnFetch(ticket) => {
                    let screen = ticket.screen;
                    if let Some(old) = self.handles.remove(&screen) {
                        old.abort();
                    }
                    let handle = spawn_fetch(ticket, self.source.clone(), self.tx.clone());
                    self.handles.insert(screen, handle);
                }
                Effect::CancelFetch(screen) => {
                    if let Some(handle) = self.handles.remove(&screen) {
                        debug!("Aborting fetch for screen {}", screen);
                        handle.abort();
                    }
                }
                Effect::Quit => quit = true,
            }
        }
        quit
    }

    fn abort_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

fn spawn_fetch(
    ticket: FetchTicket,
    source: Arc<dyn RecordSource>,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning fetch for screen {} (epoch={}) via {}: {}",
        ticket.screen,
        ticket.epoch,
        source.name(),
        ticket.url
    );
    let handle = tokio::spawn(async move {
        let action = match source.fetch(&ticket.url).await {
            Ok(page) => Action::FetchSucceeded {
                screen: ticket.screen,
                epoch: ticket.epoch,
                records: page.results,
            },
            Err(error) => Action::FetchFailed {
                screen: ticket.screen,
                epoch: ticket.epoch,
                error,
            },
        };
        if tx.send(action).is_err() {
            warn!(
                "Failed to send fetch result for screen {}: receiver dropped",
                ticket.screen
            );
        }
    });
    handle.abort_handle()
}

/// Forward connectivity transitions into the action channel.
fn spawn_connectivity_forwarder(
    monitor: &dyn ConnectivityMonitor,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    let mut subscription = monitor.subscribe();
    let handle = tokio::spawn(async move {
        while let Some(connected) = subscription.changed().await {
            if tx.send(Action::ConnectivityChanged(connected)).is_err() {
                warn!("Failed to forward connectivity change: receiver dropped");
                return;
            }
        }
        debug!("Connectivity monitor closed");
    });
    handle.abort_handle()
}

fn build_monitor(config: &ResolvedConfig) -> Box<dyn ConnectivityMonitor> {
    if config.screens.iter().any(|s| s.connectivity_gate) {
        info!(
            "Probing {} every {:?} for connectivity",
            config.probe_url, config.probe_interval
        );
        Box::new(ProbeMonitor::spawn(
            config.probe_url.clone(),
            config.probe_interval,
        ))
    } else {
        Box::new(StaticMonitor::new(true))
    }
}

/// Map a terminal event to a core action, updating presentation state on
/// the way. Returns None when the event was purely presentational.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        TuiEvent::NextScreen => {
            tui.detail.reset();
            return Some(Action::SwitchScreen(ScreenTarget::Next));
        }
        TuiEvent::PrevScreen => {
            tui.detail.reset();
            return Some(Action::SwitchScreen(ScreenTarget::Prev));
        }
        TuiEvent::SelectScreen(i) => {
            tui.detail.reset();
            return Some(Action::SwitchScreen(ScreenTarget::Index(i)));
        }
        _ => {}
    }

    let screen = app.active_screen()?;

    // Modal disclosure swallows everything but its close keys
    if screen.modal_text().is_some() {
        return match event {
            TuiEvent::Escape | TuiEvent::Submit => Some(Action::CloseModal),
            _ => None,
        };
    }

    if app.is_on_detail() {
        return match event {
            TuiEvent::Escape | TuiEvent::SwipeLeft => {
                tui.detail.reset();
                Some(Action::Back)
            }
            _ => {
                tui.detail.handle_event(&event);
                None
            }
        };
    }

    let search = match event {
        TuiEvent::Escape if !screen.state.search_text.is_empty() => Some(Action::SearchClear),
        TuiEvent::InputChar(c) => Some(Action::SearchInput(c)),
        TuiEvent::Paste(ref text) => Some(Action::SearchAppend(text.clone())),
        TuiEvent::Backspace => Some(Action::SearchBackspace),
        TuiEvent::ClearSearch => Some(Action::SearchClear),
        _ => None,
    };
    if let Some(action) = search {
        // Row positions shift under a new filter
        if let Some(list) = tui.lists.get_mut(app.active) {
            list.hide_reveal();
        }
        return Some(action);
    }

    match event {
        TuiEvent::Escape => Some(Action::Quit),
        _ if screen.shows_offline_notice() => None,
        _ => {
            tui.sync(app);
            let list = tui.lists.get_mut(app.active)?;
            match list.handle_event(&event)? {
                RecordListEvent::Open(visible) => {
                    let item_index = screen.visible().get(visible)?.item_index;
                    Some(Action::Open { item_index })
                }
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn RecordSource> = Arc::new(HttpSource::new(config.fetch_timeout));
    let monitor = build_monitor(&config);
    let mut app = App::from_config(&config, Box::new(StackNavigator::new(config.start_screen)));
    let mut tui = TuiState::new(app.screens.len(), config.swipe_threshold);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runner = FetchRunner::new(source, tx.clone());
    let forwarder = spawn_connectivity_forwarder(monitor.as_ref(), tx);

    let mut should_quit = false;
    if !monitor.is_connected() {
        should_quit |= runner.apply(update(&mut app, Action::ConnectivityChanged(false)));
    }
    should_quit |= runner.apply(update(&mut app, Action::Activate));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Poll faster while results are pending
        let loading = app.screens.iter().any(|s| s.is_loading());
        let timeout = if loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, event) {
                debug!("Dispatching {:?}", action);
                if runner.apply(update(&mut app, action)) {
                    should_quit = true;
                    break;
                }
            }
        }

        // Handle background task actions (fetch results, connectivity)
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit = runner.apply(update(&mut app, action));
        }
    }

    runner.abort_all();
    forwarder.abort();
    ratatui::restore();
    Ok(())
}
