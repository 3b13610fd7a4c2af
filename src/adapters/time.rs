//! Clock adapters.
//!
//! - [`SystemClock`] reads the host wall clock (UTC).
//! - [`ManualClock`] is set and advanced by hand; the simulator uses it to
//!   run a whole boost cycle in seconds.

use std::cell::Cell;
use std::rc::Rc;

use time::{Duration, OffsetDateTime};

use crate::app::ports::ClockPort;

/// Host wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that only moves when told to.  Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<OffsetDateTime>>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, at: OffsetDateTime) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.now.get()
    }
}
