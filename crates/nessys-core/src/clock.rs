//! Cycle pacing against the wall clock.
//!
//! Executed cycles accumulate inside a one-second window. At every sync the
//! worker spins until the cycles the window *should* have executed so far
//! (`elapsed * speed * native rate`) catch up with the cycles it *did*
//! execute. Pacing only ever slows emulation down.

use std::{
    thread,
    time::{Duration, Instant},
};

use crate::{control::Controls, cpu::CPU_CYCLES_PER_SECOND};

const SPIN_YIELD_EVERY: u32 = 512;
const WINDOW: Duration = Duration::from_secs(1);

/// Why [`Throttle::pace`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pace {
    /// Emulation is on schedule.
    OnTime,
    /// A restart or stop was requested while waiting.
    Interrupted,
}

/// Figures latched when a one-second window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowStats {
    pub cycles: u64,
}

#[derive(Debug, Clone)]
pub struct Throttle {
    anchor: Instant,
    cycles: u64,
    cycles_last_window: u64,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new()
    }
}

impl Throttle {
    pub fn new() -> Self {
        Self {
            anchor: Instant::now(),
            cycles: 0,
            cycles_last_window: 0,
        }
    }

    /// Starts a fresh window at the current instant.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn add_cycles(&mut self, cycles: u32) {
        self.cycles += cycles as u64;
    }

    /// Cycles executed in the current window.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn cycles_last_window(&self) -> u64 {
        self.cycles_last_window
    }

    /// Cycles the current window should have executed after `elapsed`.
    pub fn desired_cycles(elapsed: Duration, speed: f64) -> u64 {
        (elapsed.as_secs_f64() * speed * CPU_CYCLES_PER_SECOND as f64) as u64
    }

    /// Spins while paused or ahead of schedule.
    ///
    /// Pause, speed, restart and stop are re-read on every sample.
    pub fn pace(&self, controls: &Controls) -> Pace {
        let mut spins: u32 = 0;
        loop {
            if controls.restart_requested() || controls.stop_requested() {
                return Pace::Interrupted;
            }
            let desired = Self::desired_cycles(self.anchor.elapsed(), controls.speed_multiplier());
            if !controls.paused() && self.cycles <= desired {
                return Pace::OnTime;
            }

            std::hint::spin_loop();
            spins = spins.wrapping_add(1);
            if spins.is_multiple_of(SPIN_YIELD_EVERY) {
                thread::yield_now();
            }
        }
    }

    /// Closes the window once a full second has elapsed since its anchor.
    pub fn roll_window(&mut self) -> Option<WindowStats> {
        if self.anchor.elapsed() < WINDOW {
            return None;
        }
        self.cycles_last_window = std::mem::take(&mut self.cycles);
        self.anchor = Instant::now();
        Some(WindowStats {
            cycles: self.cycles_last_window,
        })
    }
}
