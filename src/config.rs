//! Zone configuration parameters
//!
//! Everything a zone needs at setup: entity ids, set-point bounds, the four
//! preset temperatures, hysteresis band and boost duration.  The struct is
//! immutable once a [`ZoneService`](crate::app::service::ZoneService) has
//! been built from it.  Missing fields fall back to the defaults below.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::Preset;

/// Fixed regulation interval used by the host loop unless overridden.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);

pub const DEFAULT_NAME: &str = "SmartHeat Pro";
pub const DEFAULT_MIN_TEMP: f32 = 7.0;
pub const DEFAULT_MAX_TEMP: f32 = 30.0;
pub const DEFAULT_ECO_TEMP: f32 = 18.0;
pub const DEFAULT_COMFORT_TEMP: f32 = 19.5;
pub const DEFAULT_COMFORT_PLUS_TEMP: f32 = 20.5;
pub const DEFAULT_BOOST_TEMP: f32 = 21.5;
pub const DEFAULT_HYSTERESIS: f32 = 0.2;
/// Minutes.
pub const DEFAULT_BOOST_DURATION: u32 = 30;
/// Longest accepted boost, one week in minutes.
pub const MAX_BOOST_DURATION: u32 = 7 * 24 * 60;

/// Per-zone configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Display name, also used as the log prefix.
    #[serde(default = "default_name")]
    pub name: String,
    /// Entity id of the temperature sensor.
    pub temp_sensor: String,
    /// Entity id of the heater switch.
    pub heater_entity: String,

    // --- Set-point bounds ---
    #[serde(default = "default_min_temp")]
    pub min_temp: f32,
    #[serde(default = "default_max_temp")]
    pub max_temp: f32,

    // --- Presets (°C) ---
    #[serde(default = "default_eco_temp")]
    pub eco_temp: f32,
    #[serde(default = "default_comfort_temp")]
    pub comfort_temp: f32,
    #[serde(default = "default_comfort_plus_temp")]
    pub comfort_plus_temp: f32,
    #[serde(default = "default_boost_temp")]
    pub boost_temp: f32,

    // --- Regulation ---
    /// Half-width of the dead band around the target (°C).
    #[serde(default = "default_hysteresis")]
    pub hysteresis: f32,
    /// Boost length in minutes.
    #[serde(default = "default_boost_duration")]
    pub boost_duration: u32,
}

impl ZoneConfig {
    /// Config with default temperatures for the given sensor and heater.
    pub fn new(temp_sensor: impl Into<String>, heater_entity: impl Into<String>) -> Self {
        Self {
            name: default_name(),
            temp_sensor: temp_sensor.into(),
            heater_entity: heater_entity.into(),
            min_temp: DEFAULT_MIN_TEMP,
            max_temp: DEFAULT_MAX_TEMP,
            eco_temp: DEFAULT_ECO_TEMP,
            comfort_temp: DEFAULT_COMFORT_TEMP,
            comfort_plus_temp: DEFAULT_COMFORT_PLUS_TEMP,
            boost_temp: DEFAULT_BOOST_TEMP,
            hysteresis: DEFAULT_HYSTERESIS,
            boost_duration: DEFAULT_BOOST_DURATION,
        }
    }

    /// Parse one zone from JSON and validate it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|_| Error::Config("zone config is not valid JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Target temperature configured for `preset`.
    pub fn preset_temperature(&self, preset: Preset) -> f32 {
        match preset {
            Preset::Eco => self.eco_temp,
            Preset::Comfort => self.comfort_temp,
            Preset::ComfortPlus => self.comfort_plus_temp,
            Preset::Boost => self.boost_temp,
        }
    }

    /// Boost length as a wall-clock duration.
    pub fn boost_length(&self) -> time::Duration {
        time::Duration::minutes(i64::from(self.boost_duration))
    }

    /// Clamp `value` into `[min_temp, max_temp]`.
    pub fn clamp_target(&self, value: f32) -> f32 {
        value.clamp(self.min_temp, self.max_temp)
    }

    /// Reject configurations the regulation loop cannot run safely.
    ///
    /// A zero or negative hysteresis would toggle the heater on every tick,
    /// so it is refused here rather than checked per evaluation.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("name is required"));
        }
        if self.temp_sensor.trim().is_empty() {
            return Err(Error::Config("temp_sensor is required"));
        }
        if self.heater_entity.trim().is_empty() {
            return Err(Error::Config("heater_entity is required"));
        }
        if !self.min_temp.is_finite() || !self.max_temp.is_finite() {
            return Err(Error::Config("temperature bounds must be finite"));
        }
        if self.min_temp >= self.max_temp {
            return Err(Error::Config("min_temp must be below max_temp"));
        }
        if !self.hysteresis.is_finite() || self.hysteresis <= 0.0 {
            return Err(Error::Config("hysteresis must be > 0"));
        }
        if self.boost_duration == 0 {
            return Err(Error::Config("boost_duration must be > 0"));
        }
        if self.boost_duration > MAX_BOOST_DURATION {
            return Err(Error::Config("boost_duration too large"));
        }
        for preset in Preset::ALL {
            let t = self.preset_temperature(preset);
            if !t.is_finite() || t < self.min_temp || t > self.max_temp {
                return Err(Error::Config("preset temperature outside min_temp..max_temp"));
            }
        }
        Ok(())
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_min_temp() -> f32 {
    DEFAULT_MIN_TEMP
}

fn default_max_temp() -> f32 {
    DEFAULT_MAX_TEMP
}

fn default_eco_temp() -> f32 {
    DEFAULT_ECO_TEMP
}

fn default_comfort_temp() -> f32 {
    DEFAULT_COMFORT_TEMP
}

fn default_comfort_plus_temp() -> f32 {
    DEFAULT_COMFORT_PLUS_TEMP
}

fn default_boost_temp() -> f32 {
    DEFAULT_BOOST_TEMP
}

fn default_hysteresis() -> f32 {
    DEFAULT_HYSTERESIS
}

fn default_boost_duration() -> u32 {
    DEFAULT_BOOST_DURATION
}
