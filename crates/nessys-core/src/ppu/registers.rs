//! CPU-visible PPU register state and the latches behind `$2005/$2006`.
//!
//! Scroll and VRAM address are kept as separate values that share a single
//! write toggle, rather than the loopy `v/t/x` register pair.

mod control;
mod mask;
mod status;

pub use control::Control;
pub use mask::Mask;
pub use status::Status;

use crate::{memory::ppu as ppu_mem, ram::ppu::Oam};

/// Master/slave select as resolved by the first `$2000` write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MasterSlave {
    Slave,
    Master,
    /// No control write has been seen since reset.
    #[default]
    Unset,
}

/// Aggregates the state of all CPU visible PPU registers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Registers {
    /// Mirror of the control register (`$2000`).
    pub(crate) control: Control,
    /// Mirror of the mask register (`$2001`).
    pub(crate) mask: Mask,
    /// Status register (`$2002`).
    pub(crate) status: Status,
    /// Nametable slot rendering starts from (0..3).
    pub(crate) base_nametable: u8,
    pub(crate) master_slave: MasterSlave,
    /// Current OAM pointer driven by `$2003`/`$2004`.
    pub(crate) oam_addr: u8,
    /// Primary sprite memory accessible through `$2004`.
    pub(crate) oam: Oam,
    pub(crate) scroll_x: u8,
    pub(crate) scroll_y: u8,
    /// VRAM cursor for `$2007`.
    pub(crate) vram_addr: u16,
    /// `false` until the first half of a `$2005/$2006` pair is written.
    pub(crate) w: bool,
    /// Internal buffer implementing the delayed `$2007` read behavior.
    pub(crate) vram_buffer: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Creates a new register block with the power-on reset state.
    pub fn new() -> Self {
        Self {
            control: Control::default(),
            mask: Mask::default(),
            status: Status::default(),
            base_nametable: 0,
            master_slave: MasterSlave::Unset,
            oam_addr: 0,
            oam: Oam::new(),
            scroll_x: 0,
            scroll_y: 0,
            vram_addr: 0,
            w: false,
            vram_buffer: 0,
        }
    }

    /// Restores all register values to their reset defaults.
    pub fn reset(&mut self) {
        *self = Registers::new();
    }

    /// `$2000` write.
    ///
    /// The nametable bits only latch while background rendering is on or the
    /// PPU is not a slave. Master/slave resolves once and then sticks.
    pub fn write_control(&mut self, value: u8) {
        if self.mask.show_background() || self.master_slave != MasterSlave::Slave {
            self.base_nametable = value & Control::NAMETABLE.bits();
        }
        self.control = Control::from_bits_retain(value);
        if self.master_slave == MasterSlave::Unset {
            self.master_slave = if self.control.contains(Control::MASTER_SLAVE) {
                MasterSlave::Master
            } else {
                MasterSlave::Slave
            };
        }
    }

    /// `$2001` write.
    pub fn write_mask(&mut self, value: u8) {
        self.mask = Mask::from_bits_retain(value);
    }

    /// `$2002` read. Resets the shared write toggle.
    pub fn read_status(&mut self) -> u8 {
        self.w = false;
        self.status.bits()
    }

    /// `$2003` write.
    pub fn write_oam_addr(&mut self, value: u8) {
        self.oam_addr = value;
    }

    /// `$2004` read. Does not advance the cursor.
    pub fn read_oam_data(&self) -> u8 {
        self.oam[self.oam_addr as usize]
    }

    /// `$2004` write. Advances the cursor with 8-bit wraparound.
    pub fn write_oam_data(&mut self, value: u8) {
        self.oam[self.oam_addr as usize] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    /// `$2005` write: X first, then Y.
    ///
    /// A Y value past the visible height snaps back to 0.
    pub fn write_scroll(&mut self, value: u8) {
        if self.w {
            self.scroll_y = if (value as usize) < super::SCREEN_HEIGHT {
                value
            } else {
                0
            };
        } else {
            self.scroll_x = value;
        }
        self.w = !self.w;
    }

    /// `$2006` write: high byte first, then low byte.
    pub fn write_addr(&mut self, value: u8) {
        if self.w {
            self.vram_addr = (self.vram_addr & 0xFF00) | value as u16;
        } else {
            self.vram_addr = (value as u16) << 8;
        }
        self.w = !self.w;
    }

    /// Advances the `$2007` cursor by 1 or 32.
    pub(crate) fn increment_vram_addr(&mut self) {
        self.vram_addr = self.vram_addr.wrapping_add(self.control.vram_increment());
    }

    /// Copies a full page into OAM starting at entry 0.
    pub(crate) fn load_oam(&mut self, page: &[u8; ppu_mem::OAM_SIZE]) {
        self.oam.copy_from_slice(page);
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn base_nametable(&self) -> u8 {
        self.base_nametable
    }

    pub fn master_slave(&self) -> MasterSlave {
        self.master_slave
    }

    pub fn oam_addr(&self) -> u8 {
        self.oam_addr
    }

    pub fn oam(&self) -> &[u8] {
        &self.oam
    }

    pub fn scroll(&self) -> (u8, u8) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn vram_addr(&self) -> u16 {
        self.vram_addr
    }
}
