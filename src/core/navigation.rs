//! # Navigation
//!
//! Screens never reach for a global navigator. The `App` is handed a
//! `Navigator` when it is built, and detail disclosure goes through it.
//!
//! ```text
//! Route::List(0) ──navigate(Detail)──▶ Route::List(0)
//!                                      Route::Detail { .. }   ◀─ current
//! ```

use log::debug;

use crate::core::record::RecordView;

static ROOT_FALLBACK: Route = Route::List(0);

/// A place the user can be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// One of the registered list screens, by index.
    List(usize),
    /// A single record, passed by value from the list it was opened on.
    Detail { screen: usize, record: RecordView },
}

/// Routing capability injected into the app.
pub trait Navigator: Send {
    /// Push a route.
    fn navigate(&mut self, route: Route);

    /// Pop back one route. Returns false when already at the root.
    fn back(&mut self) -> bool;

    /// Replace the whole stack with a single list screen.
    fn reset(&mut self, screen: usize);

    /// The route currently on screen.
    fn current(&self) -> &Route;
}

/// Stack navigator: list screens at the root, detail screens pushed on top.
#[derive(Debug)]
pub struct StackNavigator {
    stack: Vec<Route>,
}

impl StackNavigator {
    pub fn new(start_screen: usize) -> Self {
        Self {
            stack: vec![Route::List(start_screen)],
        }
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Navigator for StackNavigator {
    fn navigate(&mut self, route: Route) {
        debug!("navigate: {:?} (depth {})", route, self.stack.len() + 1);
        self.stack.push(route);
    }

    fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    fn reset(&mut self, screen: usize) {
        self.stack.clear();
        self.stack.push(Route::List(screen));
    }

    fn current(&self) -> &Route {
        // The stack is never empty: `back` keeps the root and `reset` pushes one.
        self.stack.last().unwrap_or(&ROOT_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn test_starts_on_list() {
        let nav = StackNavigator::new(2);
        assert_eq!(nav.current(), &Route::List(2));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_navigate_and_back() {
        let mut nav = StackNavigator::new(0);
        let detail = Route::Detail {
            screen: 0,
            record: record("Tatooine"),
        };
        nav.navigate(detail.clone());
        assert_eq!(nav.current(), &detail);
        assert!(nav.back());
        assert_eq!(nav.current(), &Route::List(0));
    }

    #[test]
    fn test_back_at_root_is_noop() {
        let mut nav = StackNavigator::new(0);
        assert!(!nav.back());
        assert_eq!(nav.current(), &Route::List(0));
    }

    #[test]
    fn test_reset_drops_detail() {
        let mut nav = StackNavigator::new(0);
        nav.navigate(Route::Detail {
            screen: 0,
            record: record("Hoth"),
        });
        nav.reset(1);
        assert_eq!(nav.current(), &Route::List(1));
        assert_eq!(nav.depth(), 1);
    }
}
