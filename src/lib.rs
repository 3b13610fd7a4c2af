//! SmartHeat zone regulation library.
//!
//! Exposes the regulation core (hysteresis, presets, scheduling) together
//! with the host-side adapters, so integration tests and the simulator
//! binary can drive zones exactly as a real host would.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod scheduler;
pub mod state;

pub use error::{Error, Result};
