//! Preset and boost handling
//!
//! Maps preset selection onto a target temperature and owns the boost
//! deadline.  Expiry back to COMFORT is the only transition that happens
//! without an external command.

use log::{info, warn};
use time::OffsetDateTime;

use crate::config::ZoneConfig;
use crate::error::{Error, Result};
use crate::state::{BoostEnd, HvacMode, Preset, RegulationState};

/// Select `preset` and move the target to its configured temperature.
///
/// BOOST arms a deadline `boost_duration` minutes from `now`; every other
/// preset clears it.  On error the state is left untouched.
pub fn select_preset(
    state: &mut RegulationState,
    config: &ZoneConfig,
    preset: Preset,
    now: OffsetDateTime,
) -> Result<()> {
    let boost_end = match preset {
        Preset::Boost => Some(BoostEnd::after(now, config.boost_length())?),
        Preset::Eco | Preset::Comfort | Preset::ComfortPlus => None,
    };

    state.preset = preset;
    state.target_temperature = config.preset_temperature(preset);
    state.boost_end = boost_end;
    Ok(())
}

/// Revert BOOST to COMFORT once its deadline has passed.
///
/// An unparsable deadline counts as expired so boost can never stick.
/// Returns `true` if the preset was reverted.
pub fn expire_boost_if_due(
    state: &mut RegulationState,
    config: &ZoneConfig,
    now: OffsetDateTime,
) -> bool {
    if state.preset != Preset::Boost {
        return false;
    }
    let Some(end) = &state.boost_end else {
        return false;
    };

    let due = match end.deadline() {
        Ok(deadline) => now >= deadline,
        Err(e) => {
            warn!(
                "{}: boost {} ({:?}), reverting to comfort",
                config.name,
                e,
                end.as_str()
            );
            true
        }
    };
    if !due {
        return false;
    }

    state.preset = Preset::Comfort;
    state.target_temperature = config.comfort_temp;
    state.boost_end = None;
    info!("{}: boost ended, back to comfort", config.name);
    true
}

/// Override the target without touching the preset or a pending boost.
///
/// Values outside the configured bounds are clamped.
pub fn set_explicit_target(
    state: &mut RegulationState,
    config: &ZoneConfig,
    value: Option<f32>,
) -> Result<()> {
    let value = value
        .filter(|v| v.is_finite())
        .ok_or(Error::InvalidTargetValue)?;
    state.target_temperature = config.clamp_target(value);
    Ok(())
}

/// Switch HEAT/OFF.  Preset and target are kept for the return to HEAT.
pub fn set_mode(state: &mut RegulationState, mode: HvacMode) {
    state.mode = mode;
}
