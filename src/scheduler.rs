//! Per-zone trigger queue and run loop.
//!
//! Every trigger for a zone (sensor change, timer tick, host command) is
//! posted into one bounded channel.  A single [`ZoneRunner`] drains it and
//! is the only code that touches the zone's [`ZoneService`], so
//! evaluations never overlap and a command arriving mid-evaluation simply
//! waits its turn.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Trigger Sources                          │
//! │                                                              │
//! │  ┌──────────────┐    ┌──────────────┐    ┌───────────────┐   │
//! │  │ Sensor change│    │ Interval     │    │ Host command  │   │
//! │  │ notification │    │ timer (30 s) │    │ preset/mode/T │   │
//! │  └──────┬───────┘    └──────┬───────┘    └───────┬───────┘   │
//! │         │                   │                    │           │
//! │         ▼                   ▼                    ▼           │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │          ZoneHandle ──▶ ZoneQueue (bounded)            │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          │  one consumer                     │
//! │                          ▼                                   │
//! │                ZoneRunner → ZoneService                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Different zones have different queues and runners and share nothing.

use core::time::Duration;
use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use crate::app::commands::ZoneCommand;
use crate::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};
use crate::app::service::{Trigger, ZoneService};
use crate::error::{Error, Result};

/// Queue depth per zone.
pub const QUEUE_DEPTH: usize = 8;

/// Something the zone must react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    SensorChanged,
    TimerTick,
    Command(ZoneCommand),
}

/// Bounded MPSC-in-practice channel feeding one zone.
pub type ZoneQueue = Channel<CriticalSectionRawMutex, ZoneEvent, QUEUE_DEPTH>;

// ═══════════════════════════════════════════════════════════════
//  Producer side
// ═══════════════════════════════════════════════════════════════

/// Cloneable, `Send` handle used by event sources to reach a zone.
#[derive(Clone)]
pub struct ZoneHandle {
    queue: Arc<ZoneQueue>,
}

impl ZoneHandle {
    /// Sensor gateway reported a new value.
    pub fn notify_sensor_changed(&self) -> Result<()> {
        self.post(ZoneEvent::SensorChanged)
    }

    /// Interval timer fired.
    pub fn tick(&self) -> Result<()> {
        self.post(ZoneEvent::TimerTick)
    }

    /// Post a host command without waiting for queue space.
    pub fn try_command(&self, cmd: ZoneCommand) -> Result<()> {
        self.post(ZoneEvent::Command(cmd))
    }

    /// Post a host command, waiting for queue space if needed.
    pub async fn command(&self, cmd: ZoneCommand) {
        self.queue.send(ZoneEvent::Command(cmd)).await;
    }

    /// Post a host command from a plain thread, blocking until there is
    /// queue space.  Host commands are never dropped.
    pub fn command_blocking(&self, cmd: ZoneCommand) {
        futures_lite::future::block_on(self.command(cmd));
    }

    /// Events waiting to be processed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn post(&self, event: ZoneEvent) -> Result<()> {
        self.queue.try_send(event).map_err(|_| Error::QueueFull)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Consumer side
// ═══════════════════════════════════════════════════════════════

/// Sole owner of a zone's service and adapters.
pub struct ZoneRunner<H, C, S> {
    service: ZoneService,
    hw: H,
    clock: C,
    sink: S,
    queue: Arc<ZoneQueue>,
}

impl<H, C, S> ZoneRunner<H, C, S>
where
    H: SensorPort + ActuatorPort,
    C: ClockPort,
    S: EventSink,
{
    /// Wire a service to its adapters and start it.
    ///
    /// Returns the runner and the first handle onto its queue.
    pub fn new(
        mut service: ZoneService,
        mut hw: H,
        clock: C,
        mut sink: S,
    ) -> (Self, ZoneHandle) {
        service.start(&mut hw, &mut sink);
        let queue = Arc::new(ZoneQueue::new());
        let handle = ZoneHandle {
            queue: Arc::clone(&queue),
        };
        let runner = Self {
            service,
            hw,
            clock,
            sink,
            queue,
        };
        (runner, handle)
    }

    /// Another handle onto this zone's queue.
    pub fn handle(&self) -> ZoneHandle {
        ZoneHandle {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Process one event to completion.
    pub fn dispatch(&mut self, event: ZoneEvent) {
        let Self {
            service,
            hw,
            clock,
            sink,
            ..
        } = self;
        let clock = &*clock;
        match event {
            ZoneEvent::SensorChanged => {
                service.evaluate(Trigger::SensorChanged, hw, clock, sink);
            }
            ZoneEvent::TimerTick => service.evaluate(Trigger::TimerTick, hw, clock, sink),
            ZoneEvent::Command(cmd) => {
                // Already logged and published as CommandRejected.
                let _ = service.handle_command(cmd, hw, clock, sink);
            }
        }
    }

    /// Process everything currently queued, in FIFO order.
    /// Returns the number of events handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.queue.try_receive() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Wait for events forever.
    pub async fn run(mut self) {
        info!("Zone '{}': run loop started", self.service.name());
        loop {
            let event = self.queue.receive().await;
            self.dispatch(event);
        }
    }

    pub fn service(&self) -> &ZoneService {
        &self.service
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }
}

// ═══════════════════════════════════════════════════════════════
//  Interval source
// ═══════════════════════════════════════════════════════════════

/// Post a [`ZoneEvent::TimerTick`] every `interval`, forever.
///
/// A full queue drops the tick; the next one follows `interval` later.
pub async fn run_interval(handle: ZoneHandle, interval: Duration) {
    loop {
        async_io_mini::Timer::after(interval).await;
        if let Err(e) = handle.tick() {
            warn!("Scheduler: timer tick dropped ({})", e);
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
