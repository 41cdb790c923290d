//! 6502 register file, interrupt controller and processor-side memory.
//!
//! There is no fetch/decode loop: translated programs call the instruction
//! methods directly (see [`mnemonic`]) and branch with native control flow.
//! The program counter is carried for completeness only.

use tracing::debug;

use crate::{
    mtu::CpuRegion,
    ram::cpu::{Sram, StackPage, Unmapped, WorkRam, ZeroPage},
};

mod mnemonic;
mod status;

pub use status::Status;

/// NTSC processor clock in cycles per second.
pub const CPU_CYCLES_PER_SECOND: u64 = 1_789_772;

/// Stack pointer value after reset (top of page one).
pub const STACK_TOP: u8 = 0xFF;

/// Interrupt context the processor is currently running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterruptContext {
    /// Regular execution, entered through the reset handler.
    #[default]
    Normal,
    Nmi,
    Irq,
}

/// Current context plus the two pending-request latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interrupts {
    current: InterruptContext,
    nmi_pending: bool,
    irq_pending: bool,
}

impl Interrupts {
    pub fn current(&self) -> InterruptContext {
        self.current
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    pub fn request_nmi(&mut self) {
        self.nmi_pending = true;
    }

    pub fn request_irq(&mut self) {
        self.irq_pending = true;
    }

    /// `true` when any request is latched.
    pub fn any_pending(&self) -> bool {
        self.nmi_pending || self.irq_pending
    }

    /// Consumes the pending requests, NMI taking priority over IRQ.
    ///
    /// Both latches are cleared whichever one wins.
    pub(crate) fn take(&mut self) -> Option<InterruptContext> {
        let next = if self.nmi_pending {
            Some(InterruptContext::Nmi)
        } else if self.irq_pending {
            Some(InterruptContext::Irq)
        } else {
            None
        };
        if next.is_some() {
            self.nmi_pending = false;
            self.irq_pending = false;
        }
        next
    }
}

/// Processor-visible backing storage.
///
/// The PRG image is writable only from the host side (translated programs
/// patch their own data tables); bus writes to the ROM window are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuMemory {
    pub(crate) zero_page: ZeroPage,
    pub(crate) stack: StackPage,
    pub(crate) work_ram: WorkRam,
    pub(crate) sram: Sram,
    pub(crate) prg_rom: Vec<u8>,
    prg_backup: Option<Vec<u8>>,
    pub(crate) unmapped: Unmapped,
}

impl CpuMemory {
    pub fn new(prg_rom: Vec<u8>) -> Self {
        Self {
            zero_page: ZeroPage::new(),
            stack: StackPage::new(),
            work_ram: WorkRam::new(),
            sram: Sram::new(),
            prg_rom,
            prg_backup: None,
            unmapped: Unmapped::new(),
        }
    }

    /// Zeroes every RAM region and brings PRG back to its pristine image.
    ///
    /// The first call captures the image, later calls restore it.
    pub(crate) fn reset(&mut self) {
        self.zero_page.clear();
        self.stack.clear();
        self.work_ram.clear();
        self.sram.clear();
        self.unmapped.clear();
        match &self.prg_backup {
            Some(backup) => self.prg_rom.copy_from_slice(backup),
            None => self.prg_backup = Some(self.prg_rom.clone()),
        }
    }

    pub(crate) fn region(&self, region: CpuRegion) -> &[u8] {
        match region {
            CpuRegion::ZeroPage => &self.zero_page,
            CpuRegion::StackPage => &self.stack,
            CpuRegion::WorkRam => &self.work_ram,
            CpuRegion::Sram => &self.sram,
            CpuRegion::PrgRom => &self.prg_rom,
        }
    }

    pub(crate) fn region_mut(&mut self, region: CpuRegion) -> &mut [u8] {
        match region {
            CpuRegion::ZeroPage => &mut self.zero_page,
            CpuRegion::StackPage => &mut self.stack,
            CpuRegion::WorkRam => &mut self.work_ram,
            CpuRegion::Sram => &mut self.sram,
            CpuRegion::PrgRom => &mut self.prg_rom,
        }
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn prg_rom_mut(&mut self) -> &mut [u8] {
        &mut self.prg_rom
    }

    pub fn sram(&self) -> &[u8] {
        &self.sram
    }

    /// Fallback bytes for `addr`, indexed by the original bus address.
    pub fn unmapped(&self, addr: u16) -> u8 {
        self.unmapped[addr as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpu {
    // Registers
    a: u8,     //Accumulator
    x: u8,     //X Index Register
    y: u8,     //Y Index Register
    s: u8,     //Stack Pointer
    p: Status, //Processor Status
    pc: u16,   //Program Counter, unused by translated code

    interrupts: Interrupts,
    pub(crate) memory: CpuMemory,
}

impl Cpu {
    pub fn new(prg_rom: Vec<u8>) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: STACK_TOP,
            p: Status::new(),
            pc: 0,
            interrupts: Interrupts::default(),
            memory: CpuMemory::new(prg_rom),
        }
    }

    /// Hardware reset: registers, flags, interrupt state and memory regions
    /// return to their power-on values.
    pub(crate) fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = STACK_TOP;
        self.p = Status::new();
        self.pc = 0;
        self.interrupts = Interrupts::default();
        self.memory.reset();
        debug!("CPU initialized");
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn s(&self) -> u8 {
        self.s
    }

    pub fn p(&self) -> Status {
        self.p
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Overwrites the whole flag byte, keeping the unused bit set.
    pub fn set_p(&mut self, value: u8) {
        self.p = Status::from_byte(value);
    }

    pub fn interrupts(&self) -> &Interrupts {
        &self.interrupts
    }

    pub fn interrupts_mut(&mut self) -> &mut Interrupts {
        &mut self.interrupts
    }

    pub fn memory(&self) -> &CpuMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut CpuMemory {
        &mut self.memory
    }

    /// Stores at the stack pointer, then decrements it.
    pub fn push(&mut self, value: u8) {
        self.memory.stack[self.s as usize] = value;
        self.s = self.s.wrapping_sub(1);
    }

    /// Increments the stack pointer, then loads.
    pub fn pop(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        self.memory.stack[self.s as usize]
    }

    /// Stack slot at `$0100 + offset`, without moving the pointer.
    pub fn stack_peek(&self, offset: u8) -> u8 {
        self.memory.stack[offset as usize]
    }

    pub(crate) fn enter_interrupt(&mut self, context: InterruptContext) {
        if context == InterruptContext::Irq {
            self.p.set_b(true);
        }
        self.push(self.p.to_byte());
        self.p.set_i(true);
        self.interrupts.current = context;
    }

    pub(crate) fn leave_interrupt(&mut self) {
        let flags = self.pop();
        self.set_p(flags);
        self.interrupts.current = InterruptContext::Normal;
    }
}
