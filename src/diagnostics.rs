//! Heating-transition history and runtime counters.
//!
//! Keeps the last 8 heater transitions in a fixed-capacity ring (oldest
//! evicted first) and a handful of counters describing what the zone loop
//! has been doing.  Both are read-only outside the service.

use heapless::Deque;
use time::OffsetDateTime;

const TRANSITION_SLOTS: usize = 8;

/// One dispatched heater command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatingTransition {
    pub at: OffsetDateTime,
    pub on: bool,
    /// Reading the decision was made on.
    pub temperature: Option<f32>,
    pub target: f32,
}

/// Ring buffer of recent heating transitions.
#[derive(Debug, Default)]
pub struct TransitionLog {
    entries: Deque<HeatingTransition, TRANSITION_SLOTS>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition, evicting the oldest when full.
    pub fn record(&mut self, transition: HeatingTransition) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // Cannot fail: a slot was just freed if the ring was full.
        let _ = self.entries.push_back(transition);
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&HeatingTransition> {
        self.entries.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HeatingTransition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters for the zone loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeMetrics {
    pub evaluations: u64,
    /// Evaluations triggered by a host command.
    pub forced_evaluations: u64,
    pub commands_sent: u64,
    /// Commands skipped because the actuator already reported the desired state.
    pub commands_suppressed: u64,
    /// Evaluations that ran without a reading.
    pub missing_readings: u64,
    pub boost_expirations: u64,
    pub rejected_commands: u64,
}
