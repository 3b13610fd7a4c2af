//! Hysteresis (bang-bang) heater decision
//!
//! Pure decision logic: given the reading, the target, the band and whether
//! we are currently heating, say whether the heater should be switched on,
//! switched off or left alone.  Applying the decision (actuator command,
//! timestamps, heating flag) is the caller's job.
//!
//! ```text
//!         off_above ─────────────  target + h
//!                     dead band
//!         on_below  ─────────────  target - h
//! ```

use crate::state::{HvacMode, RegulationState};

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TurnOn,
    TurnOff,
    NoOp,
}

/// Switching thresholds around a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Heater switches on strictly below this.
    pub on_below: f32,
    /// Heater switches off strictly above this.
    pub off_above: f32,
}

impl Band {
    pub fn around(target: f32, hysteresis: f32) -> Self {
        Self {
            on_below: target - hysteresis,
            off_above: target + hysteresis,
        }
    }

    /// True if `temperature` is inside the dead band (thresholds included).
    pub fn contains(&self, temperature: f32) -> bool {
        temperature >= self.on_below && temperature <= self.off_above
    }
}

/// Decide from raw inputs.
///
/// OFF always drives the heater off.  A missing reading never acts.
pub fn decide(
    mode: HvacMode,
    current: Option<f32>,
    target: f32,
    hysteresis: f32,
    is_heating: bool,
) -> Action {
    if mode == HvacMode::Off {
        return Action::TurnOff;
    }
    let Some(current) = current else {
        return Action::NoOp;
    };

    let band = Band::around(target, hysteresis);
    if !is_heating && current < band.on_below {
        Action::TurnOn
    } else if is_heating && current > band.off_above {
        Action::TurnOff
    } else {
        Action::NoOp
    }
}

/// Decide from the zone state.
pub fn evaluate(state: &RegulationState) -> Action {
    decide(
        state.mode(),
        state.current_temperature(),
        state.target_temperature(),
        state.hysteresis(),
        state.is_heating(),
    )
}
