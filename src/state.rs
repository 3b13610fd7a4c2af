//! Regulation state for a single zone.
//!
//! [`RegulationState`] is the one piece of mutable data per zone.  It is
//! owned by the [`ZoneService`](crate::app::service::ZoneService) and only
//! mutated from the zone's serialized event loop, so none of the fields
//! need interior mutability.
//!
//! Fields are `pub(crate)`: the preset controller and the service write
//! them, everyone else reads through the accessors.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::ZoneConfig;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Modes and presets
// ---------------------------------------------------------------------------

/// Whether regulation runs at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    Heat,
    Off,
}

impl FromStr for HvacMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "heat" => Ok(Self::Heat),
            "off" => Ok(Self::Off),
            _ => Err(Error::InvalidMode),
        }
    }
}

/// Named target-temperature profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Eco,
    Comfort,
    ComfortPlus,
    Boost,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Self::Eco, Self::Comfort, Self::ComfortPlus, Self::Boost];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eco => "eco",
            Self::Comfort => "comfort",
            Self::ComfortPlus => "comfort_plus",
            Self::Boost => "boost",
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or(Error::InvalidPreset)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the heater is doing, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    Heating,
    Idle,
}

// ---------------------------------------------------------------------------
// Boost deadline
// ---------------------------------------------------------------------------

/// Boost deadline, kept in the RFC 3339 form it is published in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoostEnd(String);

impl BoostEnd {
    /// Deadline `length` after `now`.
    pub fn after(now: OffsetDateTime, length: time::Duration) -> Result<Self> {
        let deadline = now
            .checked_add(length)
            .ok_or(Error::MalformedBoostExpiry)?;
        deadline
            .format(&Rfc3339)
            .map(Self)
            .map_err(|_| Error::MalformedBoostExpiry)
    }

    /// Wrap an already formatted deadline (e.g. one echoed back by the host).
    #[cfg(test)]
    pub(crate) fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse the stored deadline.
    pub fn deadline(&self) -> Result<OffsetDateTime> {
        OffsetDateTime::parse(&self.0, &Rfc3339).map_err(|_| Error::MalformedBoostExpiry)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// RegulationState
// ---------------------------------------------------------------------------

/// Everything the regulation engine decides on, plus diagnostic timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct RegulationState {
    pub(crate) mode: HvacMode,
    pub(crate) preset: Preset,
    pub(crate) target_temperature: f32,
    pub(crate) current_temperature: Option<f32>,
    pub(crate) hysteresis: f32,
    pub(crate) is_heating: bool,
    /// Set if and only if `preset == Boost`.
    pub(crate) boost_end: Option<BoostEnd>,
    pub(crate) last_heating_start: Option<OffsetDateTime>,
    pub(crate) last_heating_stop: Option<OffsetDateTime>,
    /// Reserved; never computed.
    pub(crate) learned_heat_rate: Option<f32>,
}

impl RegulationState {
    /// Initial state at zone setup: HEAT, COMFORT, comfort target, no reading.
    pub fn new(config: &ZoneConfig) -> Self {
        Self {
            mode: HvacMode::Heat,
            preset: Preset::Comfort,
            target_temperature: config.comfort_temp,
            current_temperature: None,
            hysteresis: config.hysteresis,
            is_heating: false,
            boost_end: None,
            last_heating_start: None,
            last_heating_stop: None,
            learned_heat_rate: None,
        }
    }

    pub fn mode(&self) -> HvacMode {
        self.mode
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn target_temperature(&self) -> f32 {
        self.target_temperature
    }

    pub fn current_temperature(&self) -> Option<f32> {
        self.current_temperature
    }

    pub fn hysteresis(&self) -> f32 {
        self.hysteresis
    }

    pub fn is_heating(&self) -> bool {
        self.is_heating
    }

    pub fn boost_end(&self) -> Option<&BoostEnd> {
        self.boost_end.as_ref()
    }

    pub fn last_heating_start(&self) -> Option<OffsetDateTime> {
        self.last_heating_start
    }

    pub fn last_heating_stop(&self) -> Option<OffsetDateTime> {
        self.last_heating_stop
    }

    pub fn learned_heat_rate(&self) -> Option<f32> {
        self.learned_heat_rate
    }

    pub fn hvac_action(&self) -> HvacAction {
        if self.is_heating {
            HvacAction::Heating
        } else {
            HvacAction::Idle
        }
    }
}
