//! Mock host adapters for integration tests.
//!
//! Records every heater command so tests can assert on the full command
//! history without a real switch, and every published event so tests can
//! check what the host would have seen.

use std::cell::RefCell;
use std::rc::Rc;

use smartheat::app::events::AppEvent;
use smartheat::app::ports::{ActuatorPort, EventSink, SensorPort, SwitchState};

// ── Heater call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct HeaterCall {
    pub entity: String,
    pub state: SwitchState,
}

// ── MockZoneHw ────────────────────────────────────────────────

/// Thermometer plus heater switch.
///
/// With `relay_follows` set (the default) the reported switch state tracks
/// the last command, like a relay that acknowledges immediately.  Clear it
/// to model a host that has not echoed the new state back yet.
pub struct MockZoneHw {
    pub reading: Option<f32>,
    pub reported: Option<SwitchState>,
    pub relay_follows: bool,
    pub calls: Vec<HeaterCall>,
}

#[allow(dead_code)]
impl MockZoneHw {
    pub fn new(reading: f32) -> Self {
        Self {
            reading: Some(reading),
            reported: Some(SwitchState::Off),
            relay_follows: true,
            calls: Vec::new(),
        }
    }

    pub fn last_call(&self) -> Option<&HeaterCall> {
        self.calls.last()
    }

    /// Commanded states only, oldest first.
    pub fn states(&self) -> Vec<SwitchState> {
        self.calls.iter().map(|c| c.state).collect()
    }
}

impl SensorPort for MockZoneHw {
    fn read_temperature(&mut self, _sensor_id: &str) -> Option<f32> {
        self.reading
    }
}

impl ActuatorPort for MockZoneHw {
    fn read_state(&self, _actuator_id: &str) -> Option<SwitchState> {
        self.reported
    }

    fn command(&mut self, actuator_id: &str, desired: SwitchState) {
        self.calls.push(HeaterCall {
            entity: actuator_id.to_string(),
            state: desired,
        });
        if self.relay_follows {
            self.reported = Some(desired);
        }
    }
}

// ── Event recorders ───────────────────────────────────────────

/// Owns the recorded events.
#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

/// Recorder that stays readable after being moved into a runner.
#[derive(Clone, Default)]
pub struct SharedEventLog(pub Rc<RefCell<Vec<AppEvent>>>);

#[allow(dead_code)]
impl SharedEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any(&self, pred: impl Fn(&AppEvent) -> bool) -> bool {
        self.0.borrow().iter().any(pred)
    }
}

impl EventSink for SharedEventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}
