//! Application core: regulation rules with no I/O of their own.
//!
//! The per-zone service, its command and event types, and the **port
//! traits** in [`ports`] through which it reaches sensors, actuators, the
//! clock and the host.  Everything here runs against mock adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
