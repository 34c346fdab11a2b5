// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wall-clock sources.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Local, TimeDelta};

/// Reads the current local time.
pub trait WallClock {
    /// The current time.
    fn now(&self) -> DateTime<Local>;
}

/// The system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a host can keep one copy to advance while
/// the display reads another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Local>>>,
}

impl ManualClock {
    /// Creates a clock stopped at `start`.
    #[must_use]
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jumps to `now`.
    pub fn set(&self, now: DateTime<Local>) {
        self.now.set(now);
    }

    /// Moves forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}
