//! Time sources the controller can poll.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// A per-call-queryable, monotonic view of the game clock.
pub trait Clock {
    /// Time left for the rest of the game.
    fn remaining(&self) -> Duration;

    /// Time spent on the current decision so far.
    fn elapsed_this_turn(&self) -> Duration;
}

/// Wall clock for one turn. The game allowance is fixed when the turn
/// starts and drains as real time passes.
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    allowance: Duration,
    turn_start: Instant,
}

impl GameClock {
    /// Start the turn now with `remaining` game time on the clock.
    pub fn start(remaining: Duration) -> Self {
        Self {
            allowance: remaining,
            turn_start: Instant::now(),
        }
    }
}

impl Clock for GameClock {
    fn remaining(&self) -> Duration {
        self.allowance.saturating_sub(self.elapsed_this_turn())
    }

    fn elapsed_this_turn(&self) -> Duration {
        self.turn_start.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    remaining: Cell<Duration>,
    elapsed: Cell<Duration>,
}

impl ManualClock {
    pub fn new(remaining: Duration) -> Self {
        Self {
            remaining: Cell::new(remaining),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Pretend `by` has passed: elapsed grows and remaining shrinks.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
        self.remaining.set(self.remaining.get().saturating_sub(by));
    }
}

impl Clock for ManualClock {
    fn remaining(&self) -> Duration {
        self.remaining.get()
    }

    fn elapsed_this_turn(&self) -> Duration {
        self.elapsed.get()
    }
}
