use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use log::{debug, warn};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C: quit from anywhere.
    ForceQuit,
    Escape,
    Submit,

    // Search box
    InputChar(char),
    Paste(String),
    Backspace,
    ClearSearch, // Ctrl+U

    // List navigation
    CursorUp,
    CursorDown,
    SwipeRight, // → reveals the row's Open action
    SwipeLeft,  // ← hides it
    ScrollPageUp,
    ScrollPageDown,

    // Screen switching
    NextScreen,
    PrevScreen,
    SelectScreen(usize), // Alt+1..9, zero-based

    // Mouse (column, row)
    MouseDown(u16, u16),
    MouseDrag(u16, u16),
    MouseUp(u16, u16),
    ScrollUp,
    ScrollDown,

    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, waiting at most `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(ev) => translate(ev),
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            None
        }
    }
}

/// Map a crossterm event onto a `TuiEvent`.
pub fn translate(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseDown(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                Some(TuiEvent::MouseDrag(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                Some(TuiEvent::MouseUp(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code, key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(TuiEvent::ClearSearch),
        (KeyModifiers::ALT, KeyCode::Char(c)) if c.is_ascii_digit() && c != '0' => {
            c.to_digit(10).map(|d| TuiEvent::SelectScreen(d as usize - 1))
        }
        (_, KeyCode::Tab) => Some(TuiEvent::NextScreen),
        (_, KeyCode::BackTab) => Some(TuiEvent::PrevScreen),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Right) => Some(TuiEvent::SwipeRight),
        (_, KeyCode::Left) => Some(TuiEvent::SwipeLeft),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}
