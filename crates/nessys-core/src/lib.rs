use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    bus::{Bus, CpuBus},
    cartridge::Cartridge,
    clock::{Pace, Throttle},
    control::Controls,
    controller::Controllers,
    cpu::{Cpu, InterruptContext},
    error::Error,
    mtu::Mtu,
    ppu::{DOTS_PER_CPU_CYCLE, Ppu, buffer::FrameHandle},
};

pub mod bus;
pub mod cartridge;
pub mod clock;
pub mod control;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod mtu;
pub mod ppu;
pub mod program;
pub mod ram;

pub use cartridge::Mirroring;
pub use mtu::{cpu_non_mirrored_addr, ppu_non_mirrored_addr};
pub use program::Program;

/// Callback run at the start of every sync checkpoint.
pub type SyncHook = Box<dyn FnMut() + Send>;

/// One console: processor, PPU, translation tables and input latches.
///
/// The owning worker thread is the only writer. Everything shared with other
/// threads lives behind [`Controls`] and the [`FrameHandle`].
pub struct Nes {
    pub cpu: Cpu,
    pub ppu: Ppu,
    mtu: Mtu,
    controllers: Controllers,
    chr_rom: Vec<u8>,
    controls: Arc<Controls>,
    frame: Arc<FrameHandle>,
    throttle: Throttle,
    sync_hook: Option<SyncHook>,
}

impl fmt::Debug for Nes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nes")
            .field("cpu", &self.cpu)
            .field("mtu", &self.mtu)
            .field("controllers", &self.controllers)
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}

impl Nes {
    /// Wires a cartridge into a powered-on console.
    ///
    /// Fails when the cartridge's nametable layout cannot be expressed.
    pub fn new(cartridge: &Cartridge, controls: Arc<Controls>) -> Result<Self, Error> {
        let mtu = Mtu::new(cartridge.prg_rom().len(), cartridge.mirroring())?;
        let mut nes = Self {
            cpu: Cpu::new(cartridge.prg_rom().to_vec()),
            ppu: Ppu::new(),
            mtu,
            controllers: Controllers::new(),
            chr_rom: cartridge.chr_rom().to_vec(),
            controls,
            frame: Arc::new(FrameHandle::new()),
            throttle: Throttle::new(),
            sync_hook: None,
        };
        nes.power_on();
        Ok(nes)
    }

    /// Hardware reset, shared by power-on and every restart.
    ///
    /// Clears the restart request, reinitializes processor and PPU state,
    /// restores PRG from its pristine copy and puts the menu state back to
    /// 1x speed, running, in colour. Live button state survives.
    pub fn power_on(&mut self) {
        self.controls.clear_restart();
        self.cpu.reset();
        self.throttle.reset();
        self.controls.reset_for_power_on();
        self.ppu.reset(&self.chr_rom);
        self.controllers.reset();
    }

    /// Runs the program's reset entry.
    pub fn run_reset_handler(&mut self, program: &mut dyn Program) -> bool {
        debug!("entering reset handler");
        let aborted = program.reset(self);
        debug!(aborted, "exited reset handler");
        aborted
    }

    /// [`power_on`](Self::power_on) followed by the reset entry.
    pub fn boot(&mut self, program: &mut dyn Program) -> bool {
        self.power_on();
        self.run_reset_handler(program)
    }

    /// Sync checkpoint, called by translated code after `cycles` processor
    /// cycles' worth of instructions.
    ///
    /// Advances the PPU, dispatches a pending interrupt when running in the
    /// normal context, then paces against the wall clock. Returns `true` when
    /// the caller must return from its current handler: a new interrupt
    /// arrived while inside one, or a restart/stop is pending.
    pub fn sync(&mut self, program: &mut dyn Program, cycles: u32) -> bool {
        if let Some(hook) = self.sync_hook.as_mut() {
            hook();
        }

        self.ppu.set_force_greyscale(self.controls.force_greyscale());
        for _ in 0..cycles * DOTS_PER_CPU_CYCLE {
            self.step_ppu();
        }

        if self.cpu.interrupts().current() == InterruptContext::Normal {
            if let Some(context) = self.cpu.interrupts_mut().take() {
                self.cpu.enter_interrupt(context);
                // An early return from the handler is not propagated; the
                // pending request is serviced at the next checkpoint.
                let _ = match context {
                    InterruptContext::Nmi => program.nmi(self),
                    InterruptContext::Irq => program.irq(self),
                    InterruptContext::Normal => false,
                };
                self.cpu.leave_interrupt();
            }
        } else if self.cpu.interrupts().any_pending() {
            return true;
        }

        self.throttle.add_cycles(cycles);
        let pace = self.throttle.pace(&self.controls);

        if let Some(stats) = self.throttle.roll_window() {
            self.controls.set_cycles_last_second(stats.cycles);
            self.controls.set_fps(self.ppu.take_frame_count());
        }

        pace == Pace::Interrupted
            || self.controls.restart_requested()
            || self.controls.stop_requested()
    }

    /// Advances the PPU by one dot, forwarding its vblank NMI and finished
    /// frames.
    fn step_ppu(&mut self) {
        let outcome = self.ppu.step(&self.mtu);
        if outcome.frame_complete {
            self.frame.present(self.ppu.output_buffer());
        }
        if outcome.nmi {
            self.cpu.interrupts_mut().request_nmi();
        }
    }

    fn bus(&mut self) -> CpuBus<'_> {
        let pads = self.controls.pad_masks();
        CpuBus::new(
            &self.mtu,
            &mut self.cpu.memory,
            &mut self.ppu,
            &mut self.controllers,
            pads,
        )
    }

    pub fn read8(&mut self, addr: u16) -> u8 {
        self.bus().read(addr)
    }

    pub fn read16(&mut self, addr: u16) -> u16 {
        self.bus().read16(addr)
    }

    pub fn write8(&mut self, addr: u16, data: u8) {
        self.bus().write(addr, data);
    }

    pub fn write16(&mut self, addr: u16, data: u16) {
        self.bus().write16(addr, data);
    }

    pub fn ppu_read8(&self, addr: u16) -> u8 {
        self.ppu.vram().read(&self.mtu, addr)
    }

    pub fn ppu_read16(&self, addr: u16) -> u16 {
        let lo = self.ppu_read8(addr);
        let hi = self.ppu_read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    pub fn ppu_write8(&mut self, addr: u16, data: u8) {
        self.ppu.vram_mut().write(&self.mtu, addr, data);
    }

    pub fn ppu_write16(&mut self, addr: u16, data: u16) {
        let [lo, hi] = data.to_le_bytes();
        self.ppu_write8(addr, lo);
        self.ppu_write8(addr.wrapping_add(1), hi);
    }

    /// STA - Store Accumulator in Memory
    pub fn sta(&mut self, addr: u16) {
        let a = self.cpu.a();
        self.write8(addr, a);
    }

    /// STX - Store Index Register X In Memory
    pub fn stx(&mut self, addr: u16) {
        let x = self.cpu.x();
        self.write8(addr, x);
    }

    /// STY - Store Index Register Y In Memory
    pub fn sty(&mut self, addr: u16) {
        let y = self.cpu.y();
        self.write8(addr, y);
    }

    /// Read-modify-write of one byte through the bus, for the memory forms
    /// of `ASL`, `LSR`, `ROL`, `ROR`, `INC` and `DEC`.
    pub fn modify(&mut self, addr: u16, op: impl FnOnce(&mut Cpu, u8) -> u8) {
        let value = self.read8(addr);
        let result = op(&mut self.cpu, value);
        self.write8(addr, result);
    }

    /// Installs or clears the per-sync callback.
    pub fn set_sync_hook(&mut self, hook: Option<SyncHook>) {
        self.sync_hook = hook;
    }

    pub fn controls(&self) -> &Arc<Controls> {
        &self.controls
    }

    /// Shared handle to the last finished frame.
    pub fn frame_handle(&self) -> Arc<FrameHandle> {
        Arc::clone(&self.frame)
    }

    pub fn mtu(&self) -> &Mtu {
        &self.mtu
    }

    pub fn controllers(&self) -> &Controllers {
        &self.controllers
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Fallback byte behind an unmapped processor address.
    pub fn unmapped(&self, addr: u16) -> u8 {
        self.cpu.memory().unmapped(addr)
    }
}
