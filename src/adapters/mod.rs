//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements         | Connects to                  |
//! |---------------|--------------------|------------------------------|
//! | `config_file` | ConfigPort         | JSON zone list on disk       |
//! | `host_state`  | SensorPort         | Raw host entity states       |
//! |               | ActuatorPort       | Host command outbox          |
//! | `log_sink`    | EventSink          | `log` facade                 |
//! | `sim`         | SensorPort         | Simulated room model         |
//! |               | ActuatorPort       |                              |
//! | `time`        | ClockPort          | System / manual clock        |

pub mod config_file;
pub mod host_state;
pub mod log_sink;
pub mod sim;
pub mod time;
