//! Integration tests for the per-zone queue and runner.
//!
//! Covers FIFO processing of mixed triggers, isolation between zones, and
//! the async run loop and interval ticker on a real executor.

use core::time::Duration;

use futures_lite::future;

use crate::mock_hw::{MockZoneHw, SharedEventLog};

use smartheat::Error;
use smartheat::adapters::time::ManualClock;
use smartheat::app::commands::ZoneCommand;
use smartheat::app::events::AppEvent;
use smartheat::app::ports::SwitchState;
use smartheat::app::service::ZoneService;
use smartheat::config::ZoneConfig;
use smartheat::scheduler::{QUEUE_DEPTH, ZoneHandle, ZoneRunner, run_interval};
use smartheat::state::{HvacMode, Preset};
use time::macros::datetime;

type Runner = ZoneRunner<MockZoneHw, ManualClock, SharedEventLog>;

fn make_runner(name: &str, reading: f32) -> (Runner, ZoneHandle, ManualClock, SharedEventLog) {
    let mut config = ZoneConfig::new(format!("sensor.{name}"), format!("switch.{name}"));
    config.name = name.to_string();
    let service = ZoneService::new(config).unwrap();
    let clock = ManualClock::new(datetime!(2026-01-10 08:00 UTC));
    let events = SharedEventLog::new();
    let (runner, handle) = ZoneRunner::new(
        service,
        MockZoneHw::new(reading),
        clock.clone(),
        events.clone(),
    );
    (runner, handle, clock, events)
}

#[test]
fn command_queued_behind_a_trigger_sees_its_result() {
    let (mut runner, handle, _clock, _events) = make_runner("living", 19.0);

    handle.notify_sensor_changed().unwrap();
    handle
        .try_command(ZoneCommand::SetHvacMode(HvacMode::Off))
        .unwrap();
    handle.tick().unwrap();

    assert_eq!(runner.drain(), 3);
    assert_eq!(
        runner.hw().states(),
        vec![SwitchState::On, SwitchState::Off]
    );
    assert_eq!(runner.service().metrics().evaluations, 3);
    assert_eq!(runner.service().metrics().forced_evaluations, 1);
}

#[test]
fn boost_expiry_through_timer_ticks() {
    let (mut runner, handle, clock, events) = make_runner("living", 20.0);
    handle
        .try_command(ZoneCommand::SetPreset("boost".into()))
        .unwrap();
    runner.drain();

    clock.advance(time::Duration::minutes(31));
    handle.tick().unwrap();
    runner.drain();

    assert_eq!(runner.service().state().preset(), Preset::Comfort);
    assert!(events.any(|e| matches!(e, AppEvent::BoostExpired)));
}

#[test]
fn zones_do_not_share_queues() {
    let (mut living, living_handle, _c1, _e1) = make_runner("living", 15.0);
    let (mut bedroom, bedroom_handle, _c2, _e2) = make_runner("bedroom", 15.0);

    living_handle.tick().unwrap();
    living_handle
        .try_command(ZoneCommand::SetPreset("eco".into()))
        .unwrap();

    assert_eq!(bedroom_handle.pending(), 0);
    assert_eq!(bedroom.drain(), 0);
    assert_eq!(living.drain(), 2);

    assert_eq!(living.service().state().preset(), Preset::Eco);
    assert_eq!(bedroom.service().state().preset(), Preset::Comfort);
    assert!(bedroom.hw().calls.is_empty());
    assert_eq!(living.hw().last_call().unwrap().entity, "switch.living");
}

#[test]
fn overflow_is_reported_and_queue_recovers() {
    let (mut runner, handle, _clock, _events) = make_runner("living", 20.0);
    for _ in 0..QUEUE_DEPTH {
        handle.notify_sensor_changed().unwrap();
    }
    assert_eq!(handle.tick(), Err(Error::QueueFull));
    assert_eq!(runner.drain(), QUEUE_DEPTH);
    assert!(handle.tick().is_ok());
}

#[test]
fn producers_on_other_threads_reach_the_runner() {
    let (mut runner, handle, _clock, _events) = make_runner("living", 15.0);
    let producers: Vec<_> = (0..4)
        .map(|_| {
            let h = handle.clone();
            std::thread::spawn(move || h.notify_sensor_changed().unwrap())
        })
        .collect();
    for p in producers {
        p.join().unwrap();
    }
    assert_eq!(runner.drain(), 4);
    assert_eq!(runner.hw().states(), vec![SwitchState::On]);
}

#[test]
fn run_loop_processes_async_commands() {
    let (runner, handle, _clock, events) = make_runner("living", 20.0);

    let boosted = future::block_on(future::or(
        async {
            runner.run().await;
            false
        },
        async {
            handle
                .command(ZoneCommand::SetPreset("boost".into()))
                .await;
            while !events.any(|e| matches!(e, AppEvent::HeaterCommanded { on: true })) {
                future::yield_now().await;
            }
            true
        },
    ));
    assert!(boosted);
}

#[test]
fn interval_source_posts_ticks() {
    let (_runner, handle, _clock, _events) = make_runner("living", 20.0);
    let watcher = handle.clone();

    future::block_on(future::or(
        run_interval(handle, Duration::from_millis(5)),
        async move {
            while watcher.pending() < 2 {
                async_io_mini::Timer::after(Duration::from_millis(1)).await;
            }
        },
    ));
}
