//! Values shared between the emulation worker and the presentation thread.
//!
//! The worker is the only writer of hardware state; everything a menu or an
//! input callback can touch lives here behind atomics and is sampled at each
//! sync checkpoint.

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, AtomicU64, Ordering};

use crate::{
    controller::{Button, PORTS},
    cpu::CPU_CYCLES_PER_SECOND,
};

/// Frames-per-second figure reported right after a reset.
pub const DEFAULT_FPS: u32 = 60;

/// Emulation speed presets offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Speed {
    #[default]
    Normal,
    Double,
    Quintuple,
    /// Effectively unthrottled.
    Unbounded,
}

impl Speed {
    pub const ALL: [Speed; 4] = [
        Speed::Normal,
        Speed::Double,
        Speed::Quintuple,
        Speed::Unbounded,
    ];

    pub const fn multiplier(self) -> f64 {
        match self {
            Speed::Normal => 1.0,
            Speed::Double => 2.0,
            Speed::Quintuple => 5.0,
            Speed::Unbounded => 100.0,
        }
    }

    /// Preset whose multiplier equals `value`, if any.
    pub fn from_multiplier(value: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.multiplier() == value)
    }
}

#[derive(Debug)]
pub struct Controls {
    paused: AtomicBool,
    restart: AtomicBool,
    stop: AtomicBool,
    speed_bits: AtomicU64,
    force_greyscale: AtomicBool,
    pad_masks: [AtomicU8; PORTS],
    fps: AtomicU32,
    cycles_last_second: AtomicU64,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    pub fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
            restart: AtomicBool::new(false),
            stop: AtomicBool::new(false),
            speed_bits: AtomicU64::new(Speed::Normal.multiplier().to_bits()),
            force_greyscale: AtomicBool::new(false),
            pad_masks: std::array::from_fn(|_| AtomicU8::new(0)),
            fps: AtomicU32::new(DEFAULT_FPS),
            cycles_last_second: AtomicU64::new(0),
        }
    }

    pub fn paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    pub fn restart_requested(&self) -> bool {
        self.restart.load(Ordering::Acquire)
    }

    /// Asks the worker to reboot at the next checkpoint.
    pub fn request_restart(&self) {
        self.restart.store(true, Ordering::Release);
    }

    pub fn clear_restart(&self) {
        self.restart.store(false, Ordering::Release);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Asks the worker to leave its loop. Sticky until the controls are dropped.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn speed_multiplier(&self) -> f64 {
        f64::from_bits(self.speed_bits.load(Ordering::Acquire))
    }

    pub fn set_speed(&self, speed: Speed) {
        self.set_speed_multiplier(speed.multiplier());
    }

    pub fn set_speed_multiplier(&self, multiplier: f64) {
        self.speed_bits
            .store(multiplier.to_bits(), Ordering::Release);
    }

    pub fn force_greyscale(&self) -> bool {
        self.force_greyscale.load(Ordering::Acquire)
    }

    pub fn set_force_greyscale(&self, value: bool) {
        self.force_greyscale.store(value, Ordering::Release);
    }

    /// Records a button transition on controller `pad` (0 or 1).
    pub fn set_button(&self, pad: usize, button: Button, pressed: bool) {
        let Some(mask) = self.pad_masks.get(pad) else {
            return;
        };
        if pressed {
            mask.fetch_or(button.mask(), Ordering::AcqRel);
        } else {
            mask.fetch_and(!button.mask(), Ordering::AcqRel);
        }
    }

    /// Live button state of controller `pad`, bit n = button n in shift order.
    pub fn pad_mask(&self, pad: usize) -> u8 {
        self.pad_masks
            .get(pad)
            .map_or(0, |mask| mask.load(Ordering::Acquire))
    }

    pub fn pad_masks(&self) -> [u8; PORTS] {
        std::array::from_fn(|pad| self.pad_mask(pad))
    }

    pub fn fps(&self) -> u32 {
        self.fps.load(Ordering::Acquire)
    }

    pub fn set_fps(&self, fps: u32) {
        self.fps.store(fps, Ordering::Release);
    }

    pub fn cycles_last_second(&self) -> u64 {
        self.cycles_last_second.load(Ordering::Acquire)
    }

    pub fn set_cycles_last_second(&self, cycles: u64) {
        self.cycles_last_second.store(cycles, Ordering::Release);
    }

    /// Executed cycles of the last full second as a percentage of the
    /// native clock rate.
    pub fn speed_percent(&self) -> f64 {
        self.cycles_last_second() as f64 / CPU_CYCLES_PER_SECOND as f64 * 100.0
    }

    /// Menu state a power cycle restores: speed 1x and running.
    pub(crate) fn reset_for_power_on(&self) {
        self.set_speed(Speed::Normal);
        self.set_paused(false);
        self.set_force_greyscale(false);
        self.set_fps(DEFAULT_FPS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_set_and_clear_individual_bits() {
        let controls = Controls::new();
        controls.set_button(0, Button::A, true);
        controls.set_button(0, Button::Start, true);
        controls.set_button(1, Button::Right, true);
        assert_eq!(controls.pad_masks(), [0b0000_1001, 0b1000_0000]);

        controls.set_button(0, Button::A, false);
        assert_eq!(controls.pad_mask(0), 0b0000_1000);
    }

    #[test]
    fn out_of_range_pad_is_ignored() {
        let controls = Controls::new();
        controls.set_button(7, Button::A, true);
        assert_eq!(controls.pad_mask(7), 0);
        assert_eq!(controls.pad_masks(), [0, 0]);
    }

    #[test]
    fn speed_presets_round_trip_through_bits() {
        let controls = Controls::new();
        assert_eq!(controls.speed_multiplier(), 1.0);
        for speed in Speed::ALL {
            controls.set_speed(speed);
            assert_eq!(
                Speed::from_multiplier(controls.speed_multiplier()),
                Some(speed)
            );
        }
        assert_eq!(Speed::from_multiplier(3.0), None);
    }

    #[test]
    fn speed_percent_uses_native_clock() {
        let controls = Controls::new();
        controls.set_cycles_last_second(CPU_CYCLES_PER_SECOND / 2);
        assert!((controls.speed_percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn power_on_restores_menu_defaults() {
        let controls = Controls::new();
        controls.set_speed(Speed::Quintuple);
        controls.set_paused(true);
        controls.set_force_greyscale(true);
        controls.set_fps(12);
        controls.request_restart();
        controls.reset_for_power_on();
        assert_eq!(controls.speed_multiplier(), 1.0);
        assert!(!controls.paused());
        assert!(!controls.force_greyscale());
        assert_eq!(controls.fps(), DEFAULT_FPS);
        // The restart request is owned by the boot loop.
        assert!(controls.restart_requested());
    }
}
