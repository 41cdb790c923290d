use std::time::Duration;

use nessys_core::control::{Controls, Speed};

/// Initial menu state for a freshly started runtime.
///
/// Applied by `Runtime::start` right after power-on, before the worker is
/// spawned. Later restarts come back with the power-on defaults instead.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RuntimeConfig {
    pub speed: Speed,
    pub force_greyscale: bool,
    pub paused: bool,
}

impl RuntimeConfig {
    pub(crate) fn apply(&self, controls: &Controls) {
        controls.set_speed(self.speed);
        controls.set_force_greyscale(self.force_greyscale);
        controls.set_paused(self.paused);
    }
}

/// Why the worker loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// A stop was requested through the handle or by dropping the runtime.
    Stopped,
    /// The reset entry returned without a restart or stop pending.
    ProgramReturned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeNotification {
    /// Power-on finished and the reset entry is about to run.
    /// `boot` counts from 1.
    Booted { boot: u32 },
    /// A restart request ended the reset entry; the console reboots next.
    Rebooting,
    Exited(ExitReason),
}

/// Overlay figures sampled from the shared controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub fps: u32,
    pub speed_percent: f64,
    pub speed_multiplier: f64,
    /// Menu preset matching `speed_multiplier`, if any.
    pub speed: Option<Speed>,
    pub paused: bool,
    pub frame_seq: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("failed to power on the console")]
    PowerOn(#[from] nessys_core::error::Error),
    #[error("failed to spawn the runtime worker")]
    Spawn(#[source] std::io::Error),
    #[error("runtime worker panicked")]
    WorkerPanicked,
    #[error("runtime worker already joined")]
    AlreadyJoined,
}

pub(crate) const WORKER_NAME: &str = "nessys-runtime";
/// Polling interval while waiting for a frame to be published.
pub(crate) const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(1);
