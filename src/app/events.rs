//! Outbound zone events.
//!
//! The [`ZoneService`](super::service::ZoneService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: write host state, log, record.

use serde::Serialize;

use crate::error::Error;
use crate::state::{HvacAction, HvacMode, Preset};

/// Structured events emitted by a zone.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The zone has started.
    Started { zone: String },

    /// Full state publication; sent after every evaluation and command.
    StateWritten(ZoneSnapshot),

    /// A heater command was dispatched.
    HeaterCommanded { on: bool },

    /// Boost deadline passed; the zone is back on COMFORT.
    BoostExpired,

    /// A host command was refused; state is unchanged.
    CommandRejected(Error),
}

/// Everything the host displays for a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSnapshot {
    pub name: String,
    pub current_temperature: Option<f32>,
    pub target_temperature: f32,
    pub min_temp: f32,
    pub max_temp: f32,
    pub hvac_mode: HvacMode,
    pub hvac_action: HvacAction,
    pub preset_mode: Preset,
    pub attributes: ZoneAttributes,
}

/// Extra state attributes, keyed exactly as the host expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneAttributes {
    pub learned_heat_rate: Option<f32>,
    pub last_heating_start: Option<String>,
    pub last_heating_stop: Option<String>,
    pub boost_end: Option<String>,
    pub is_heating: bool,
    pub eco_temp: f32,
    pub comfort_temp: f32,
    pub comfort_plus_temp: f32,
    pub boost_temp: f32,
    pub hysteresis: f32,
}

impl ZoneSnapshot {
    /// JSON document for the host state machine.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
