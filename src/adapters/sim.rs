//! Simulated room for the host binary.
//!
//! First-order thermal model: the room loses heat towards the outdoor
//! temperature and gains a fixed rate while the heater is on.  The sensor
//! reports to 0.1 °C like a typical room thermometer, and the heater relay
//! acknowledges commands immediately.

use std::cell::RefCell;
use std::rc::Rc;

use core::time::Duration;

use crate::app::ports::{ActuatorPort, SensorPort, SwitchState};

/// Room model parameters.
#[derive(Debug, Clone, Copy)]
pub struct RoomModel {
    pub outdoor_temp: f32,
    /// Time constant of heat loss, in seconds.
    pub loss_time_constant: f32,
    /// Heater gain in °C per second.
    pub heat_rate: f32,
}

impl Default for RoomModel {
    fn default() -> Self {
        Self {
            outdoor_temp: 5.0,
            loss_time_constant: 3600.0,
            heat_rate: 0.01,
        }
    }
}

#[derive(Debug)]
pub struct SimulatedRoom {
    model: RoomModel,
    temperature: f32,
    heater: SwitchState,
    sensor_online: bool,
}

impl SimulatedRoom {
    pub fn new(model: RoomModel, initial_temp: f32) -> Self {
        Self {
            model,
            temperature: initial_temp,
            heater: SwitchState::Off,
            sensor_online: true,
        }
    }

    /// Advance the model by `dt`.  Returns `true` if the reported
    /// reading changed.
    pub fn step(&mut self, dt: Duration) -> bool {
        let before = self.reported();
        let dt = dt.as_secs_f32();
        let loss = (self.model.outdoor_temp - self.temperature) / self.model.loss_time_constant;
        let gain = if self.heater.is_on() {
            self.model.heat_rate
        } else {
            0.0
        };
        self.temperature += (loss + gain) * dt;
        self.reported() != before
    }

    /// True room temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn heater(&self) -> SwitchState {
        self.heater
    }

    /// Take the sensor offline (reads as missing) or bring it back.
    pub fn set_sensor_online(&mut self, online: bool) {
        self.sensor_online = online;
    }

    fn reported(&self) -> Option<f32> {
        self.sensor_online
            .then(|| (self.temperature * 10.0).round() / 10.0)
    }
}

impl SensorPort for SimulatedRoom {
    fn read_temperature(&mut self, _sensor_id: &str) -> Option<f32> {
        self.reported()
    }
}

impl ActuatorPort for SimulatedRoom {
    fn read_state(&self, _actuator_id: &str) -> Option<SwitchState> {
        Some(self.heater)
    }

    fn command(&mut self, _actuator_id: &str, desired: SwitchState) {
        self.heater = desired;
    }
}

/// Single-thread shared room: the zone runner owns one clone, the model
/// stepper another.
#[derive(Debug, Clone)]
pub struct SharedRoom(Rc<RefCell<SimulatedRoom>>);

impl SharedRoom {
    pub fn new(room: SimulatedRoom) -> Self {
        Self(Rc::new(RefCell::new(room)))
    }

    pub fn step(&self, dt: Duration) -> bool {
        self.0.borrow_mut().step(dt)
    }

    pub fn temperature(&self) -> f32 {
        self.0.borrow().temperature()
    }
}

impl SensorPort for SharedRoom {
    fn read_temperature(&mut self, sensor_id: &str) -> Option<f32> {
        self.0.borrow_mut().read_temperature(sensor_id)
    }
}

impl ActuatorPort for SharedRoom {
    fn read_state(&self, actuator_id: &str) -> Option<SwitchState> {
        self.0.borrow().read_state(actuator_id)
    }

    fn command(&mut self, actuator_id: &str, desired: SwitchState) {
        self.0.borrow_mut().command(actuator_id, desired);
    }
}
