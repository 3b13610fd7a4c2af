//! Integration tests for the host-state adapter driving a real zone.
//!
//! The host hands over raw entity strings; the zone must treat
//! placeholders as missing readings and only ever talk to the heater
//! through the command outbox.

use smartheat::adapters::host_state::{HostStates, parse_service_call};
use smartheat::adapters::time::ManualClock;
use smartheat::app::ports::SwitchState;
use smartheat::app::service::{Trigger, ZoneService};
use smartheat::config::ZoneConfig;
use smartheat::state::Preset;
use time::macros::datetime;

use crate::mock_hw::EventLog;

const SENSOR: &str = "sensor.office";
const HEATER: &str = "switch.office_heater";

fn make_zone() -> (ZoneService, HostStates, ManualClock, EventLog) {
    let svc = ZoneService::new(ZoneConfig::new(SENSOR, HEATER)).unwrap();
    let mut host = HostStates::new();
    host.set(HEATER, "off");
    (
        svc,
        host,
        ManualClock::new(datetime!(2026-01-10 08:00 UTC)),
        EventLog::new(),
    )
}

#[test]
fn unavailable_sensor_never_reads_as_zero() {
    let (mut svc, mut host, clock, mut sink) = make_zone();
    for raw in ["unavailable", "unknown", "", "n/a"] {
        host.set(SENSOR, raw);
        svc.evaluate(Trigger::SensorChanged, &mut host, &clock, &mut sink);
        assert_eq!(svc.state().current_temperature(), None, "raw={raw:?}");
    }
    assert!(host.take_commands().is_empty());
}

#[test]
fn commands_go_to_the_outbox_until_the_host_confirms() {
    let (mut svc, mut host, clock, mut sink) = make_zone();
    host.set(SENSOR, "18.4");

    svc.evaluate(Trigger::SensorChanged, &mut host, &clock, &mut sink);
    assert_eq!(
        host.take_commands(),
        vec![(HEATER.to_string(), SwitchState::On)]
    );

    // Heating is assumed from here on, confirmed or not.
    svc.evaluate(Trigger::TimerTick, &mut host, &clock, &mut sink);
    assert!(host.take_commands().is_empty());
    assert!(svc.state().is_heating());

    host.set(HEATER, "on");
    host.set(SENSOR, "19.9");
    svc.evaluate(Trigger::SensorChanged, &mut host, &clock, &mut sink);
    assert_eq!(
        host.take_commands(),
        vec![(HEATER.to_string(), SwitchState::Off)]
    );

    host.set(HEATER, "off");
    svc.evaluate(Trigger::TimerTick, &mut host, &clock, &mut sink);
    assert!(host.take_commands().is_empty());
}

#[test]
fn switch_already_in_target_state_gets_no_command() {
    let (mut svc, mut host, clock, mut sink) = make_zone();
    host.set(SENSOR, "18.4");
    svc.evaluate(Trigger::SensorChanged, &mut host, &clock, &mut sink);
    host.take_commands();

    // The host never echoed "on"; the switch still reports off.
    host.set(SENSOR, "19.9");
    svc.evaluate(Trigger::SensorChanged, &mut host, &clock, &mut sink);
    assert!(host.take_commands().is_empty());
    assert!(!svc.state().is_heating());
    assert_eq!(svc.metrics().commands_suppressed, 1);
}

#[test]
fn service_calls_drive_the_zone() {
    let (mut svc, mut host, clock, mut sink) = make_zone();
    host.set(SENSOR, "20.0");

    let cmd = parse_service_call("set_preset_mode", "comfort_plus")
        .unwrap()
        .unwrap();
    svc.handle_command(cmd, &mut host, &clock, &mut sink).unwrap();
    assert_eq!(svc.state().preset(), Preset::ComfortPlus);
    assert_eq!(
        host.take_commands(),
        vec![(HEATER.to_string(), SwitchState::On)]
    );

    let cmd = parse_service_call("set_temperature", "abc").unwrap().unwrap();
    assert!(svc.handle_command(cmd, &mut host, &clock, &mut sink).is_err());
    assert!((svc.state().target_temperature() - 20.5).abs() < f32::EPSILON);
}
