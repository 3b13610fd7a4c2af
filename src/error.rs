//! Unified error types for the regulation engine.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! zone loop's error handling uniform.  All variants are `Copy` so they can
//! be logged, counted and re-emitted as events without allocation.
//!
//! Nothing here is fatal: every variant is recovered where it is raised and
//! the zone keeps regulating on the next trigger.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Preset name is not one of eco / comfort / comfort_plus / boost.
    InvalidPreset,
    /// HVAC mode name is not one of heat / off.
    InvalidMode,
    /// Sensor value is absent, unknown, unavailable or not a number.
    MissingReading,
    /// Stored boost deadline could not be parsed (or computed).
    MalformedBoostExpiry,
    /// Explicit target temperature is absent or not finite.
    InvalidTargetValue,
    /// The zone event queue is full; the event was dropped.
    QueueFull,
    /// Zone configuration failed validation.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPreset => write!(f, "invalid preset"),
            Self::InvalidMode => write!(f, "invalid hvac mode"),
            Self::MissingReading => write!(f, "temperature reading missing"),
            Self::MalformedBoostExpiry => write!(f, "malformed boost expiry"),
            Self::InvalidTargetValue => write!(f, "invalid target temperature"),
            Self::QueueFull => write!(f, "zone event queue full"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
