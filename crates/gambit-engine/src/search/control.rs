//! Search control: the per-move deadline the searcher polls.

use std::cell::Cell;
use std::time::Duration;

use crate::clock::Clock;

/// Decides when a search must abort.
///
/// Polled on every search node. Once the slice is used up the control
/// latches, so later polls return `true` without reading the clock again.
pub struct SearchControl<'a, C: Clock + ?Sized> {
    clock: &'a C,
    slice: Duration,
    stopped: Cell<bool>,
}

impl<'a, C: Clock + ?Sized> SearchControl<'a, C> {
    /// Control that stops once `clock` reports `slice` spent on this turn.
    pub fn new(clock: &'a C, slice: Duration) -> Self {
        Self {
            clock,
            slice,
            stopped: Cell::new(false),
        }
    }

    /// `true` if the time slice is used up.
    pub fn should_stop(&self) -> bool {
        if self.stopped.get() {
            return true;
        }
        if self.clock.elapsed_this_turn() >= self.slice {
            self.stopped.set(true);
            return true;
        }
        false
    }

    /// Whether any poll has fired. A search that returned while this is set
    /// was cut short and its score is meaningless.
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    pub fn slice(&self) -> Duration {
        self.slice
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed_this_turn()
    }
}
