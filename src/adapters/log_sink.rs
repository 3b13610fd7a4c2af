//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every zone event to the `log`
//! facade.  The host binary routes it to `env_logger`; a host-bus adapter
//! would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] under the zone's name.
pub struct LogEventSink {
    zone: String,
}

impl LogEventSink {
    pub fn new(zone: impl Into<String>) -> Self {
        Self { zone: zone.into() }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::StateWritten(s) => {
                let current = s
                    .current_temperature
                    .map_or_else(|| "--".to_string(), |t| format!("{t:.1}"));
                info!(
                    "STATE | {} | mode={:?} preset={} | T={}\u{00b0}C target={:.1}\u{00b0}C | {:?}{}",
                    self.zone,
                    s.hvac_mode,
                    s.preset_mode,
                    current,
                    s.target_temperature,
                    s.hvac_action,
                    s.attributes
                        .boost_end
                        .as_deref()
                        .map(|end| format!(" | boost_end={end}"))
                        .unwrap_or_default(),
                );
            }
            AppEvent::HeaterCommanded { on } => {
                info!("HEAT  | {} | {}", self.zone, if *on { "ON" } else { "OFF" });
            }
            AppEvent::BoostExpired => {
                info!("BOOST | {} | expired, back to comfort", self.zone);
            }
            AppEvent::CommandRejected(e) => {
                warn!("CMD   | {} | rejected: {}", self.zone, e);
            }
            AppEvent::Started { zone } => {
                info!("START | {}", zone);
            }
        }
    }
}
