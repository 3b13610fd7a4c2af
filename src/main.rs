//! SmartHeat host: simulated zones driven by the regulation core.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SharedRoom          LogEventSink   JsonConfigFile  SystemClock│
//! │  (Sensor+Actuator)   (EventSink)    (ConfigPort)    (ClockPort)│
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ZoneService (pure logic)                  │    │
//! │  │  Hysteresis · Preset/Boost                             │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  ZoneRunner (queue consumer) · run_interval · room stepper     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One thread per zone, each running a local executor.  Host commands
//! are read from stdin as `<zone> <service> [data]`, where `<zone>` is a
//! zone name or its index, e.g. `0 set_preset_mode boost`.

use std::io::BufRead;
use std::sync::mpsc;

use anyhow::{Context, Result, anyhow};
use core::time::Duration;
use log::{info, warn};

use smartheat::adapters::config_file::JsonConfigFile;
use smartheat::adapters::host_state::parse_service_call;
use smartheat::adapters::log_sink::LogEventSink;
use smartheat::adapters::sim::{RoomModel, SharedRoom, SimulatedRoom};
use smartheat::adapters::time::SystemClock;
use smartheat::app::ports::ConfigPort;
use smartheat::app::service::ZoneService;
use smartheat::config::{DEFAULT_SCAN_INTERVAL, ZoneConfig};
use smartheat::scheduler::{ZoneHandle, ZoneRunner, run_interval};

const SCAN_INTERVAL_ENV: &str = "SMARTHEAT_SCAN_INTERVAL_SECS";

/// Real time between room model steps.
const SIM_STEP: Duration = Duration::from_secs(1);
/// Simulated time per step.
const SIM_DT: Duration = Duration::from_secs(60);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let zones = match std::env::args().nth(1) {
        Some(path) => JsonConfigFile::new(&path)
            .load()
            .with_context(|| format!("loading zones from {path}"))?,
        None => {
            info!("No config file given, running one default zone");
            vec![ZoneConfig::new("sensor.sim_room", "switch.sim_heater")]
        }
    };
    let interval = scan_interval();
    info!(
        "SmartHeat starting: {} zone(s), scan interval {}s",
        zones.len(),
        interval.as_secs()
    );

    let (handle_tx, handle_rx) = mpsc::channel::<(usize, String, ZoneHandle)>();
    let mut threads = Vec::with_capacity(zones.len());
    for (index, config) in zones.into_iter().enumerate() {
        let tx = handle_tx.clone();
        let name = config.name.clone();
        let thread = std::thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                if let Err(e) = run_zone(index, config, interval, tx) {
                    log::error!("{}: zone stopped: {:#}", name, e);
                }
            })
            .context("spawning zone thread")?;
        threads.push(thread);
    }
    drop(handle_tx);

    // Indexes stay those of the config file, even if a zone failed to start.
    let mut handles: Vec<(usize, String, ZoneHandle)> = handle_rx.iter().collect();
    handles.sort_by_key(|(index, _, _)| *index);
    if handles.is_empty() {
        return Err(anyhow!("no zone started"));
    }

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if let Err(e) = forward_command(&handles, &line) {
            warn!("Command '{}' ignored: {}", line.trim(), e);
        }
    }

    info!("stdin closed, zones keep running");
    for thread in threads {
        let _ = thread.join();
    }
    Ok(())
}

fn scan_interval() -> Duration {
    match std::env::var(SCAN_INTERVAL_ENV) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!("{}={:?} is not a positive integer, using default", SCAN_INTERVAL_ENV, raw);
                DEFAULT_SCAN_INTERVAL
            }
        },
        Err(_) => DEFAULT_SCAN_INTERVAL,
    }
}

/// Build one zone and run it on the current thread until the process exits.
fn run_zone(
    index: usize,
    config: ZoneConfig,
    interval: Duration,
    handles: mpsc::Sender<(usize, String, ZoneHandle)>,
) -> Result<()> {
    let name = config.name.clone();
    let room = SharedRoom::new(SimulatedRoom::new(RoomModel::default(), config.eco_temp));
    let service = ZoneService::new(config)?;
    let (runner, handle) = ZoneRunner::new(
        service,
        room.clone(),
        SystemClock::new(),
        LogEventSink::new(&name),
    );
    handles
        .send((index, name, handle.clone()))
        .map_err(|_| anyhow!("command reader gone"))?;
    drop(handles);

    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();
    executor.spawn(runner.run()).detach();
    executor.spawn(run_interval(handle.clone(), interval)).detach();
    executor.spawn(step_room(room, handle)).detach();

    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
    Ok(())
}

/// Advance the room model and notify the zone when the sensor moves.
async fn step_room(room: SharedRoom, handle: ZoneHandle) {
    loop {
        async_io_mini::Timer::after(SIM_STEP).await;
        if room.step(SIM_DT) {
            log::trace!("room now {:.2}\u{00b0}C", room.temperature());
            if let Err(e) = handle.notify_sensor_changed() {
                warn!("sensor change dropped ({})", e);
            }
        }
    }
}

/// `<zone name|index> <service> [data]`
fn forward_command(handles: &[(usize, String, ZoneHandle)], line: &str) -> Result<()> {
    let mut parts = line.split_whitespace();
    let (Some(zone), Some(service)) = (parts.next(), parts.next()) else {
        return Err(anyhow!("expected '<zone> <service> [data]'"));
    };
    let data = parts.next().unwrap_or("");
    let index = zone.parse::<usize>().ok();
    let (_, _, handle) = handles
        .iter()
        .find(|(_, name, _)| name == zone)
        .or_else(|| handles.iter().find(|(i, _, _)| Some(*i) == index))
        .ok_or_else(|| anyhow!("unknown zone '{zone}'"))?;
    let cmd = parse_service_call(service, data)?
        .ok_or_else(|| anyhow!("unknown service '{service}'"))?;
    handle.command_blocking(cmd);
    Ok(())
}
