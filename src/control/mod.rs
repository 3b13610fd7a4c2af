//! Regulation logic: pure functions over [`RegulationState`](crate::state::RegulationState).
//!
//! [`hysteresis`] decides heater on/off; [`preset`] maps presets to targets
//! and expires boost.  Neither touches a port.

pub mod hysteresis;
pub mod preset;

pub use hysteresis::{Action, Band};
