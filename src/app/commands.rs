//! Inbound commands to a zone.
//!
//! These represent actions requested by the host (UI, automations, API)
//! that the [`ZoneService`](super::service::ZoneService) applies and then
//! re-evaluates on.

use crate::state::HvacMode;

/// Commands the host can send into a zone.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneCommand {
    /// Select a preset by its host name (`eco`, `comfort`, `comfort_plus`, `boost`).
    SetPreset(String),

    /// Switch between HEAT and OFF.
    SetHvacMode(HvacMode),

    /// Override the target temperature without changing the preset.
    /// `None` models a request that carried no temperature.
    SetTemperature(Option<f32>),
}

impl ZoneCommand {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SetPreset(_) => "set_preset",
            Self::SetHvacMode(_) => "set_hvac_mode",
            Self::SetTemperature(_) => "set_temperature",
        }
    }
}
