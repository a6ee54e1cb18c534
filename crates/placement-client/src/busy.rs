//! Busy indicator shared by every operation on a screen.
//!
//! [`BusyIndicator::show`] hands back a [`BusyGuard`]; dropping the guard
//! hides the indicator.  The guard is moved into the marshaled completion, so
//! the hide runs on the presentation thread on success, on failure, and even
//! when the completion is discarded.
//!
//! Concurrent operations on one screen share a single flag: whichever
//! finishes first hides it while the others are still running.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct BusyState {
    visible: Cell<bool>,
    shows: Cell<usize>,
    hides: Cell<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct BusyIndicator {
    state: Rc<BusyState>,
}

impl BusyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the indicator visible until the returned guard is dropped.
    pub fn show(&self) -> BusyGuard {
        self.state.visible.set(true);
        self.state.shows.set(self.state.shows.get() + 1);
        BusyGuard {
            indicator: self.clone(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible.get()
    }

    pub fn show_count(&self) -> usize {
        self.state.shows.get()
    }

    pub fn hide_count(&self) -> usize {
        self.state.hides.get()
    }

    fn hide(&self) {
        self.state.visible.set(false);
        self.state.hides.set(self.state.hides.get() + 1);
    }
}

/// One pending hide.  Not `Clone`: each show is paired with exactly one hide.
#[must_use = "dropping the guard hides the indicator immediately"]
#[derive(Debug)]
pub struct BusyGuard {
    indicator: BusyIndicator,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}
