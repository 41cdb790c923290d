use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, unbounded};
use nessys_core::{
    Nes, Program,
    cartridge::Cartridge,
    control::{Controls, Speed},
    controller::Button,
    ppu::buffer::FrameHandle,
};
use tracing::{debug, warn};

use super::{
    runner::Runner,
    types::{
        ExitReason, FRAME_POLL_INTERVAL, RuntimeConfig, RuntimeError, RuntimeNotification, Stats,
        WORKER_NAME,
    },
};

struct RuntimeInner {
    controls: Arc<Controls>,
    frame: Arc<FrameHandle>,
    event_rx: Receiver<RuntimeNotification>,
}

/// Owns the worker thread. Dropping it stops the worker and joins it.
pub struct Runtime {
    inner: Arc<RuntimeInner>,
    join: Option<JoinHandle<ExitReason>>,
}

/// Cloneable access to a running [`Runtime`] for the presentation thread.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Arc<RuntimeInner>,
}

impl Runtime {
    /// Powers on a console for `cartridge` and boots `program` on a new
    /// worker thread.
    ///
    /// Cartridge problems surface here, before any thread is spawned. `config`
    /// is in place before this returns, so host controls set afterwards are
    /// never overwritten by the first boot.
    pub fn start(
        cartridge: &Cartridge,
        program: Box<dyn Program + Send>,
        config: RuntimeConfig,
    ) -> Result<Self, RuntimeError> {
        let controls = Arc::new(Controls::new());
        let nes = Nes::new(cartridge, Arc::clone(&controls))?;
        config.apply(&controls);
        let frame = nes.frame_handle();
        let (event_tx, event_rx) = unbounded::<RuntimeNotification>();

        let runner = Runner::new(nes, program, event_tx);
        let join = thread::Builder::new()
            .name(WORKER_NAME.to_owned())
            .spawn(move || runner.run())
            .map_err(RuntimeError::Spawn)?;

        let inner = Arc::new(RuntimeInner {
            controls,
            frame,
            event_rx,
        });

        Ok(Self {
            inner,
            join: Some(join),
        })
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    /// `true` once the worker loop has returned.
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the worker to exit on its own.
    pub fn join(mut self) -> Result<ExitReason, RuntimeError> {
        self.join_worker()
    }

    /// Requests a stop and waits for the worker to wind down.
    pub fn stop(mut self) -> Result<ExitReason, RuntimeError> {
        self.inner.controls.request_stop();
        self.join_worker()
    }

    fn join_worker(&mut self) -> Result<ExitReason, RuntimeError> {
        let join = self.join.take().ok_or(RuntimeError::AlreadyJoined)?;
        join.join().map_err(|_| RuntimeError::WorkerPanicked)
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if self.join.is_none() {
            return;
        }
        self.inner.controls.request_stop();
        match self.join_worker() {
            Ok(reason) => debug!(?reason, "runtime worker joined"),
            Err(err) => warn!(%err, "runtime worker did not exit cleanly"),
        }
    }
}

impl RuntimeHandle {
    pub fn controls(&self) -> &Arc<Controls> {
        &self.inner.controls
    }

    pub fn frame_handle(&self) -> Arc<FrameHandle> {
        Arc::clone(&self.inner.frame)
    }

    /// Lifecycle notifications from the worker.
    pub fn notifications(&self) -> Receiver<RuntimeNotification> {
        self.inner.event_rx.clone()
    }

    pub fn pause(&self) {
        self.inner.controls.set_paused(true);
    }

    pub fn resume(&self) {
        self.inner.controls.set_paused(false);
    }

    /// Flips the pause state, returning the new one.
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.inner.controls.paused();
        self.inner.controls.set_paused(paused);
        paused
    }

    pub fn is_paused(&self) -> bool {
        self.inner.controls.paused()
    }

    /// Reboots the console at the worker's next checkpoint, even while paused.
    pub fn restart(&self) {
        self.inner.controls.request_restart();
    }

    /// Ends the worker loop at its next checkpoint.
    pub fn request_stop(&self) {
        self.inner.controls.request_stop();
    }

    pub fn set_speed(&self, speed: Speed) {
        self.inner.controls.set_speed(speed);
    }

    pub fn set_force_greyscale(&self, enabled: bool) {
        self.inner.controls.set_force_greyscale(enabled);
    }

    pub fn set_button(&self, pad: usize, button: Button, pressed: bool) {
        self.inner.controls.set_button(pad, button, pressed);
    }

    pub fn frame_seq(&self) -> u64 {
        self.inner.frame.frame_seq()
    }

    /// Blocks until a frame newer than `after` is published or `timeout`
    /// elapses. Returns the new sequence number.
    pub fn wait_for_frame(&self, after: u64, timeout: Duration) -> Option<u64> {
        let deadline = Instant::now() + timeout;
        loop {
            let seq = self.inner.frame.frame_seq();
            if seq > after {
                return Some(seq);
            }
            if Instant::now() >= deadline {
                return None;
            }
            thread::sleep(FRAME_POLL_INTERVAL);
        }
    }

    pub fn stats(&self) -> Stats {
        let controls = &self.inner.controls;
        let speed_multiplier = controls.speed_multiplier();
        Stats {
            fps: controls.fps(),
            speed_percent: controls.speed_percent(),
            speed_multiplier,
            speed: Speed::from_multiplier(speed_multiplier),
            paused: controls.paused(),
            frame_seq: self.inner.frame.frame_seq(),
        }
    }
}
