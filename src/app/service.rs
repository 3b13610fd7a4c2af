//! Zone service: the hexagonal core.
//!
//! [`ZoneService`] owns one zone's configuration, regulation state and
//! diagnostics.  It exposes a host-agnostic API; all I/O flows through
//! port traits injected at call sites, making the whole service testable
//! with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                 │       ZoneService       │
//! ActuatorPort ◀──│ Hysteresis · Preset     │ ◀── ClockPort
//!                 └─────────────────────────┘
//! ```
//!
//! The service itself is not synchronised.  One zone = one owner; the
//! [`scheduler`](crate::scheduler) serialises every trigger onto it.

use log::{debug, info, warn};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::ZoneConfig;
use crate::control::hysteresis::{self, Action, Band};
use crate::control::preset;
use crate::diagnostics::{HeatingTransition, RuntimeMetrics, TransitionLog};
use crate::error::{Error, Result};
use crate::state::{HvacMode, Preset, RegulationState};

use super::commands::ZoneCommand;
use super::events::{AppEvent, ZoneAttributes, ZoneSnapshot};
use super::ports::{ActuatorPort, ClockPort, EventSink, SensorPort, SwitchState};

/// Why an evaluation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The sensor reported a new value.
    SensorChanged,
    /// Fixed-interval timer.
    TimerTick,
    /// A host command changed preset, mode or target.
    Command,
}

impl Trigger {
    /// Forced evaluations only differ in logging.
    pub fn is_forced(self) -> bool {
        self == Self::Command
    }
}

// ───────────────────────────────────────────────────────────────
// ZoneService
// ───────────────────────────────────────────────────────────────

/// The regulation service for a single zone.
pub struct ZoneService {
    config: ZoneConfig,
    state: RegulationState,
    transitions: TransitionLog,
    metrics: RuntimeMetrics,
}

impl ZoneService {
    /// Build the service from a validated configuration.
    ///
    /// Starts in HEAT / COMFORT with no reading.  Does **not** read the
    /// sensor; call [`start`](Self::start) next.
    pub fn new(config: ZoneConfig) -> Result<Self> {
        config.validate()?;
        let state = RegulationState::new(&config);
        Ok(Self {
            config,
            state,
            transitions: TransitionLog::new(),
            metrics: RuntimeMetrics::default(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Take the first reading and publish the initial state.
    pub fn start(&mut self, hw: &mut impl SensorPort, sink: &mut impl EventSink) {
        self.state.current_temperature = hw.read_temperature(&self.config.temp_sensor);
        sink.emit(&AppEvent::Started {
            zone: self.config.name.clone(),
        });
        sink.emit(&AppEvent::StateWritten(self.snapshot()));
        info!(
            "{}: started (sensor={}, heater={})",
            self.config.name, self.config.temp_sensor, self.config.heater_entity
        );
    }

    // ── Evaluation cycle ──────────────────────────────────────

    /// One full cycle: refresh reading → expire boost → decide → apply → publish.
    pub fn evaluate(
        &mut self,
        trigger: Trigger,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let now = clock.now();
        self.metrics.evaluations += 1;
        if trigger.is_forced() {
            self.metrics.forced_evaluations += 1;
        }

        // 1. Refresh the reading; absent means absent, not the last value.
        self.state.current_temperature = hw.read_temperature(&self.config.temp_sensor);

        // 2. Boost expiry
        if preset::expire_boost_if_due(&mut self.state, &self.config, now) {
            self.metrics.boost_expirations += 1;
            sink.emit(&AppEvent::BoostExpired);
        }

        // 3. Decide
        let action = hysteresis::evaluate(&self.state);
        self.log_decision(trigger, action);

        // 4. Apply
        self.apply(action, hw, now, sink);

        // 5. Publish
        sink.emit(&AppEvent::StateWritten(self.snapshot()));
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a host command and re-evaluate.
    ///
    /// Rejected commands leave the state untouched, issue no actuator
    /// command and emit [`AppEvent::CommandRejected`].
    pub fn handle_command(
        &mut self,
        cmd: ZoneCommand,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let applied = match &cmd {
            ZoneCommand::SetPreset(name) => name.parse::<Preset>().and_then(|p| {
                preset::select_preset(&mut self.state, &self.config, p, clock.now())
            }),
            ZoneCommand::SetHvacMode(mode) => {
                preset::set_mode(&mut self.state, *mode);
                Ok(())
            }
            ZoneCommand::SetTemperature(value) => {
                preset::set_explicit_target(&mut self.state, &self.config, *value)
            }
        };

        if let Err(e) = applied {
            warn!("{}: {} rejected: {} ({:?})", self.config.name, cmd.label(), e, cmd);
            self.metrics.rejected_commands += 1;
            sink.emit(&AppEvent::CommandRejected(e));
            return Err(e);
        }

        debug!("{}: {} applied ({:?})", self.config.name, cmd.label(), cmd);
        self.evaluate(Trigger::Command, hw, clock, sink);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Host-facing view of the zone.
    pub fn snapshot(&self) -> ZoneSnapshot {
        let s = &self.state;
        let c = &self.config;
        ZoneSnapshot {
            name: c.name.clone(),
            current_temperature: s.current_temperature(),
            target_temperature: s.target_temperature(),
            min_temp: c.min_temp,
            max_temp: c.max_temp,
            hvac_mode: s.mode(),
            hvac_action: s.hvac_action(),
            preset_mode: s.preset(),
            attributes: ZoneAttributes {
                learned_heat_rate: s.learned_heat_rate(),
                last_heating_start: s.last_heating_start().and_then(format_timestamp),
                last_heating_stop: s.last_heating_stop().and_then(format_timestamp),
                boost_end: s.boost_end().map(|b| b.as_str().to_string()),
                is_heating: s.is_heating(),
                eco_temp: c.eco_temp,
                comfort_temp: c.comfort_temp,
                comfort_plus_temp: c.comfort_plus_temp,
                boost_temp: c.boost_temp,
                hysteresis: c.hysteresis,
            },
        }
    }

    pub fn state(&self) -> &RegulationState {
        &self.state
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn metrics(&self) -> RuntimeMetrics {
        self.metrics
    }

    pub fn transitions(&self) -> &TransitionLog {
        &self.transitions
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate a decision into at most one actuator command.
    ///
    /// The actuator's reported state is read first; if it already matches,
    /// no command is sent and only the local flag is aligned.  Otherwise
    /// the command is dispatched without waiting and the flag and
    /// timestamp are updated optimistically.
    fn apply(
        &mut self,
        action: Action,
        hw: &mut impl ActuatorPort,
        now: OffsetDateTime,
        sink: &mut impl EventSink,
    ) {
        let desired = match action {
            Action::TurnOn => SwitchState::On,
            Action::TurnOff => SwitchState::Off,
            Action::NoOp => return,
        };
        let heater = &self.config.heater_entity;

        if hw.read_state(heater) == Some(desired) {
            self.metrics.commands_suppressed += 1;
            self.state.is_heating = desired.is_on();
            debug!("{}: heater {} already {:?}", self.config.name, heater, desired);
            return;
        }

        hw.command(heater, desired);
        self.metrics.commands_sent += 1;
        self.state.is_heating = desired.is_on();
        if desired.is_on() {
            self.state.last_heating_start = Some(now);
            info!("{}: heater on ({})", self.config.name, heater);
        } else {
            self.state.last_heating_stop = Some(now);
            info!("{}: heater off ({})", self.config.name, heater);
        }
        self.transitions.record(HeatingTransition {
            at: now,
            on: desired.is_on(),
            temperature: self.state.current_temperature,
            target: self.state.target_temperature,
        });
        sink.emit(&AppEvent::HeaterCommanded {
            on: desired.is_on(),
        });
    }

    fn log_decision(&mut self, trigger: Trigger, action: Action) {
        let name = &self.config.name;
        let target = self.state.target_temperature;
        let Some(current) = self.state.current_temperature else {
            if self.state.mode == HvacMode::Heat {
                self.metrics.missing_readings += 1;
                debug!("{}: {}, no regulation", name, Error::MissingReading);
            }
            return;
        };

        if trigger.is_forced() {
            let band = Band::around(target, self.state.hysteresis);
            debug!(
                "{}: forced check - current={:.2} target={:.2} ({:.2}/{:.2}) -> {:?}",
                name, current, target, band.on_below, band.off_above, action
            );
        } else {
            debug!(
                "{}: {:?} - current={:.2} target={:.2} -> {:?}",
                name, trigger, current, target, action
            );
        }
    }
}

fn format_timestamp(at: OffsetDateTime) -> Option<String> {
    at.format(&Rfc3339).ok()
}
