//! Polling harness behind the `monitor` demo.
//!
//! Everything here writes to a caller-supplied [`io::Write`] and talks to any
//! [`ControllerApi`], so the exit paths and the redraw rule can be exercised without a
//! terminal or a real controller.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::config::PlatformKey;
use crate::dashboard::{self, Dashboard, CLEAR_SCREEN};
use crate::device::ControllerApi;
use crate::watch::{Observation, PacketWatch};

/// Poll period used when none is configured; roughly one frame at 60 Hz.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Debug)]
pub struct Options {
    /// Slot to watch; `None` picks the first connected controller.
    pub index: Option<u32>,
    pub interval: Duration,
    /// One JSON line per changed snapshot instead of the dashboard.
    pub json: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            index: None,
            interval: DEFAULT_INTERVAL,
            json: false,
        }
    }
}

/// How the startup checks ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preflight {
    /// The backend is the stub; nothing to poll.
    Unavailable,
    NoControllers,
    Ready { index: u32 },
}

/// What one poll did to the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// First disconnected poll after being connected; `Disconnected!` was printed.
    Disconnected,
    /// Still disconnected, or same packet number; nothing printed.
    Idle,
    Redrawn,
}

/// Print the banner and decide whether there is anything to poll.
pub fn preflight<A, W>(
    pads: &A,
    backend: &str,
    requested: Option<u32>,
    out: &mut W,
) -> io::Result<Preflight>
where
    A: ControllerApi + ?Sized,
    W: Write,
{
    writeln!(out, "xinput-monitor")?;
    writeln!(out, "==============\n")?;
    writeln!(out, "Platform: {}", PlatformKey::current())?;
    writeln!(out, "XInput available: {}", pads.is_available())?;
    writeln!(out, "Backend: {backend}")?;
    writeln!(out)?;

    if !pads.is_available() {
        writeln!(out, "XInput is only available on Windows.")?;
        return Ok(Preflight::Unavailable);
    }

    let controllers = pads.connected_controllers();
    let Some(&first) = controllers.first() else {
        writeln!(out, "Connected controllers: None")?;
        writeln!(out, "\nNo controllers connected.")?;
        return Ok(Preflight::NoControllers);
    };
    writeln!(out, "Connected controllers: {controllers:?}")?;

    let index = requested.unwrap_or(first);
    writeln!(out, "\nUsing controller {index}")?;
    writeln!(
        out,
        "Battery: {}",
        dashboard::battery_line(&pads.battery_info(index))
    )?;
    writeln!(out, "\nPolling... Press Ctrl+C to exit.\n")?;
    Ok(Preflight::Ready { index })
}

/// Per-slot polling state: redraws only when the packet number moves.
#[derive(Clone, Debug)]
pub struct Monitor {
    index: u32,
    json: bool,
    watch: PacketWatch,
    was_connected: bool,
}

impl Monitor {
    /// `index` was connected at preflight, so a disconnect on the first poll is reported.
    pub fn new(index: u32, json: bool) -> Self {
        Self {
            index,
            json,
            watch: PacketWatch::new(),
            was_connected: true,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn tick<A, W>(&mut self, pads: &A, out: &mut W) -> io::Result<Tick>
    where
        A: ControllerApi + ?Sized,
        W: Write,
    {
        let state = pads.controller_state(self.index);

        let tick = match self.watch.observe(&state) {
            Observation::Disconnected => {
                let first = self.was_connected;
                self.was_connected = false;
                if !first {
                    return Ok(Tick::Idle);
                }
                writeln!(out, "Disconnected!")?;
                Tick::Disconnected
            }
            Observation::Unchanged => return Ok(Tick::Idle),
            Observation::Changed(gamepad) => {
                self.was_connected = true;
                if self.json {
                    serde_json::to_writer(&mut *out, &state)?;
                    writeln!(out)?;
                } else {
                    write!(out, "{CLEAR_SCREEN}")?;
                    writeln!(
                        out,
                        "{}",
                        Dashboard {
                            index: self.index,
                            gamepad,
                        }
                    )?;
                }
                Tick::Redrawn
            }
        };
        out.flush()?;
        Ok(tick)
    }
}

/// Preflight, then poll every `opts.interval` until `stop` is set.
///
/// Returns how preflight ended; `Done.` is printed only after a loop ran.
pub fn run<A, W>(
    pads: &A,
    backend: &str,
    opts: &Options,
    stop: &AtomicBool,
    out: &mut W,
) -> io::Result<Preflight>
where
    A: ControllerApi + ?Sized,
    W: Write,
{
    let outcome = preflight(pads, backend, opts.index, out)?;
    let Preflight::Ready { index } = outcome else {
        return Ok(outcome);
    };

    let interval = opts.interval.max(Duration::from_millis(1));
    let mut monitor = Monitor::new(index, opts.json);
    let mut next_tick = Instant::now();

    while !stop.load(Ordering::Relaxed) {
        monitor.tick(pads, out)?;

        next_tick += interval;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            next_tick = now;
        }
    }

    writeln!(out, "\nDone.")?;
    Ok(outcome)
}
