//! Port traits: the hexagonal boundary between regulation logic and the host.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ZoneService (domain)
//! ```
//!
//! Driven adapters (sensor gateway, actuator gateway, clock, event sinks,
//! config storage) implement these traits.  The
//! [`ZoneService`](super::service::ZoneService) consumes them via generics,
//! so the domain core never talks to the host platform directly.

use time::OffsetDateTime;

use crate::config::ZoneConfig;

// ───────────────────────────────────────────────────────────────
// Sensor port (host → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain the zone temperature.
pub trait SensorPort {
    /// Current temperature in °C.
    ///
    /// "unknown" / "unavailable" / unparsable readings MUST come back as
    /// `None`, never as a numeric default.
    fn read_temperature(&mut self, sensor_id: &str) -> Option<f32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → host)
// ───────────────────────────────────────────────────────────────

/// Binary heater state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Write-side port: the domain calls this to command the heater.
pub trait ActuatorPort {
    /// Last state reported by the actuator, `None` if unknown.
    fn read_state(&self, actuator_id: &str) -> Option<SwitchState>;

    /// Dispatch an on/off command.  Fire-and-forget: implementations must
    /// not block waiting for acknowledgment.
    fn command(&mut self, actuator_id: &str, desired: SwitchState);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for boost deadlines and diagnostic timestamps.
pub trait ClockPort {
    fn now(&self) -> OffsetDateTime;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → host state publication / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, host state
/// machine, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads zone configuration produced by the external setup flow.
///
/// Implementations MUST return only configs that pass
/// [`ZoneConfig::validate`].
pub trait ConfigPort {
    fn load(&self) -> Result<Vec<ZoneConfig>, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
