//! Host entity-state adapter.
//!
//! The host publishes every entity as a raw string state (`"21.3"`,
//! `"on"`, `"unavailable"`, ...).  [`HostStates`] holds such a table and
//! exposes it through [`SensorPort`] and [`ActuatorPort`]; heater commands
//! go to an outbox the host drains, and the reported switch state only
//! changes when the host writes it back.

use std::collections::HashMap;

use log::debug;

use crate::app::commands::ZoneCommand;
use crate::app::ports::{ActuatorPort, SensorPort, SwitchState};
use crate::error::{Error, Result};

pub const STATE_UNKNOWN: &str = "unknown";
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// Parse a raw sensor state into °C.
///
/// Placeholders, empty strings, non-numeric text and NaN/inf are all
/// [`Error::MissingReading`].  There is no numeric fallback.
pub fn parse_reading(raw: &str) -> Result<f32> {
    let raw = raw.trim();
    if raw.is_empty()
        || raw.eq_ignore_ascii_case(STATE_UNKNOWN)
        || raw.eq_ignore_ascii_case(STATE_UNAVAILABLE)
    {
        return Err(Error::MissingReading);
    }
    match raw.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::MissingReading),
    }
}

/// Parse a raw switch state.  Anything but `on`/`off` is unknown.
pub fn parse_switch(raw: &str) -> Option<SwitchState> {
    match raw.trim() {
        s if s.eq_ignore_ascii_case("on") => Some(SwitchState::On),
        s if s.eq_ignore_ascii_case("off") => Some(SwitchState::Off),
        _ => None,
    }
}

/// Turn a host service call into a zone command.
///
/// Returns `Ok(None)` for services this zone does not handle.  A missing
/// or unparsable temperature is passed through as `SetTemperature(None)`
/// so the zone rejects it with [`Error::InvalidTargetValue`].
pub fn parse_service_call(service: &str, data: &str) -> Result<Option<ZoneCommand>> {
    let data = data.trim();
    let cmd = match service.trim() {
        "set_preset_mode" => ZoneCommand::SetPreset(data.to_string()),
        "set_hvac_mode" => ZoneCommand::SetHvacMode(data.parse()?),
        "set_temperature" => ZoneCommand::SetTemperature(data.parse::<f32>().ok()),
        _ => return Ok(None),
    };
    Ok(Some(cmd))
}

/// In-memory table of raw host entity states.
#[derive(Debug, Default)]
pub struct HostStates {
    states: HashMap<String, String>,
    outbox: Vec<(String, SwitchState)>,
}

impl HostStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state the host currently reports for `entity`.
    pub fn set(&mut self, entity: impl Into<String>, raw: impl Into<String>) {
        self.states.insert(entity.into(), raw.into());
    }

    pub fn get(&self, entity: &str) -> Option<&str> {
        self.states.get(entity).map(String::as_str)
    }

    /// Heater commands issued since the last call, oldest first.
    pub fn take_commands(&mut self) -> Vec<(String, SwitchState)> {
        core::mem::take(&mut self.outbox)
    }
}

impl SensorPort for HostStates {
    fn read_temperature(&mut self, sensor_id: &str) -> Option<f32> {
        let raw = self.get(sensor_id)?;
        match parse_reading(raw) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!("HostStates: {} = {:?} ({})", sensor_id, raw, e);
                None
            }
        }
    }
}

impl ActuatorPort for HostStates {
    fn read_state(&self, actuator_id: &str) -> Option<SwitchState> {
        self.get(actuator_id).and_then(parse_switch)
    }

    fn command(&mut self, actuator_id: &str, desired: SwitchState) {
        self.outbox.push((actuator_id.to_string(), desired));
    }
}
