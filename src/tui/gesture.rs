//! # Swipe Gestures
//!
//! Mouse press + rightward drag on a list row. Dragging at least
//! `threshold` columns reveals the row's Open action; letting go short of
//! that springs the row back. A press and release without movement is a tap.
//!
//! ```text
//! press(row, col) ──drag(col')──▶ offset = col' - col
//!                                      │
//!                 release(): offset >= threshold ? Revealed : Cancelled
//! ```

/// Result of letting go of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Revealed(usize),
    Cancelled(usize),
    Tap(usize),
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    row: usize,
    origin_col: u16,
    offset: u16,
    moved: bool,
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: u16,
    active: Option<Drag>,
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold: threshold.max(1),
            active: None,
        }
    }

    #[cfg(test)]
    fn threshold(&self) -> u16 {
        self.threshold
    }

    pub fn press(&mut self, row: usize, col: u16) {
        self.active = Some(Drag {
            row,
            origin_col: col,
            offset: 0,
            moved: false,
        });
    }

    /// Track the pointer. Leftward movement clamps the offset to zero.
    pub fn drag(&mut self, col: u16) {
        if let Some(drag) = self.active.as_mut() {
            drag.offset = col.saturating_sub(drag.origin_col);
            drag.moved |= col != drag.origin_col;
        }
    }

    pub fn release(&mut self) -> Option<SwipeOutcome> {
        let drag = self.active.take()?;
        Some(if !drag.moved {
            SwipeOutcome::Tap(drag.row)
        } else if drag.offset >= self.threshold {
            SwipeOutcome::Revealed(drag.row)
        } else {
            SwipeOutcome::Cancelled(drag.row)
        })
    }

    /// How far `row` is currently dragged, capped at the threshold.
    pub fn offset_for(&self, row: usize) -> u16 {
        match self.active {
            Some(drag) if drag.row == row => drag.offset.min(self.threshold),
            _ => 0,
        }
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}
