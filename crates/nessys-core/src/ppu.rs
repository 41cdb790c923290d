//! Scanline-based picture processing unit.
//!
//! The PPU advances one dot per [`Ppu::step`] call (three per processor
//! cycle). Work happens only when a scanline's 341 dots roll over:
//!
//! - lines `1..240` render into the working buffer,
//! - line 240 flips the working buffer into the output buffer and enters
//!   vertical blank (raising an NMI request when enabled),
//! - line 262 wraps back to 0 and clears the sprite-zero-hit flag.
//!
//! Line 0 is reached by wrapping, never by rolling over, so it is never
//! rendered and the top row of the working buffer keeps its previous content.

pub mod buffer;
pub mod palette;
pub mod registers;
pub mod sprite;
pub mod vram;

mod render;

use tracing::debug;

use crate::{memory::ppu as ppu_mem, mtu::Mtu, mtu::ppu_non_mirrored_addr};
use buffer::{blank_frame, flip_rows};
use registers::{Mask, Registers, Status};
use vram::Vram;

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 240;
/// Pixels per tile edge.
pub const TILE_SIZE: usize = 8;
/// Tiles per nametable row.
pub const TILES_WIDE: usize = SCREEN_WIDTH / TILE_SIZE;

pub const CYCLES_PER_SCANLINE: u16 = 341;
pub const SCANLINES_PER_FRAME: u16 = 262;
/// Scanline on which vertical blank is reported.
pub const VBLANK_SCANLINE: u16 = SCREEN_HEIGHT as u16;
/// PPU dots per processor cycle.
pub const DOTS_PER_CPU_CYCLE: u32 = 3;

/// Side effects of a single [`Ppu::step`] the caller has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StepOutcome {
    /// Vertical blank started with NMI generation enabled.
    pub nmi: bool,
    /// The output buffer now holds a finished frame.
    pub frame_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ppu {
    registers: Registers,
    vram: Vram,
    /// Dot within the current scanline (0..341).
    cycles: u16,
    scanline: u16,
    sprites_on_line: u8,
    /// Frames finished since the counter was last taken.
    frame_count: u32,
    force_greyscale: bool,
    /// Top-to-bottom render target.
    working: Box<[u32]>,
    /// Last finished frame, bottom-to-top.
    output: Box<[u32]>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            registers: Registers::new(),
            vram: Vram::new(),
            cycles: 0,
            scanline: 0,
            sprites_on_line: 0,
            frame_count: 0,
            force_greyscale: false,
            working: blank_frame(),
            output: blank_frame(),
        }
    }

    /// Clears registers and video memory and loads the cartridge tiles.
    ///
    /// Frame buffers are left as they are.
    pub fn reset(&mut self, chr: &[u8]) {
        self.registers.reset();
        self.vram.reset(chr);
        self.cycles = 0;
        self.scanline = 0;
        self.sprites_on_line = 0;
        self.frame_count = 0;
        self.force_greyscale = false;
        debug!("PPU initialized");
    }

    /// Advances one dot.
    pub fn step(&mut self, mtu: &Mtu) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        self.cycles += 1;
        if self.cycles < CYCLES_PER_SCANLINE {
            return outcome;
        }
        self.cycles = 0;
        self.scanline += 1;

        if (self.scanline as usize) < SCREEN_HEIGHT {
            self.render_scanline(mtu);
        } else if self.scanline == VBLANK_SCANLINE {
            flip_rows(&self.working, &mut self.output);
            self.frame_count += 1;
            outcome.frame_complete = true;
        } else if self.scanline == SCANLINES_PER_FRAME {
            self.scanline = 0;
            self.registers.status.remove(Status::SPRITE_ZERO_HIT);
        }

        let vblank = self.scanline == VBLANK_SCANLINE;
        self.registers.status.set(Status::VERTICAL_BLANK, vblank);
        outcome.nmi = vblank && self.registers.control.nmi_enabled();
        outcome
    }

    /// `$2000` write.
    pub fn write_control(&mut self, value: u8) {
        self.registers.write_control(value);
    }

    /// `$2001` write.
    pub fn write_mask(&mut self, value: u8) {
        self.registers.write_mask(value);
    }

    /// `$2002` read.
    pub fn read_status(&mut self) -> u8 {
        self.registers.read_status()
    }

    /// `$2003` write.
    pub fn write_oam_addr(&mut self, value: u8) {
        self.registers.write_oam_addr(value);
    }

    /// `$2004` read.
    pub fn read_oam_data(&self) -> u8 {
        self.registers.read_oam_data()
    }

    /// `$2004` write.
    pub fn write_oam_data(&mut self, value: u8) {
        self.registers.write_oam_data(value);
    }

    /// `$2005` write.
    pub fn write_scroll(&mut self, value: u8) {
        self.registers.write_scroll(value);
    }

    /// `$2006` write.
    pub fn write_addr(&mut self, value: u8) {
        self.registers.write_addr(value);
    }

    /// `$2007` read.
    ///
    /// Palette reads return immediately; everything else returns the
    /// previously buffered byte and refills the buffer.
    pub fn read_data(&mut self, mtu: &Mtu) -> u8 {
        let addr = self.registers.vram_addr;
        let folded = ppu_non_mirrored_addr(addr);
        let result = if (ppu_mem::PALETTE_START..ppu_mem::PALETTE_END).contains(&folded) {
            self.vram.read(mtu, addr)
        } else {
            let buffered = self.registers.vram_buffer;
            self.registers.vram_buffer = self.vram.read(mtu, addr);
            buffered
        };
        self.registers.increment_vram_addr();
        result
    }

    /// `$2007` write.
    pub fn write_data(&mut self, mtu: &Mtu, value: u8) {
        self.vram.write(mtu, self.registers.vram_addr, value);
        self.registers.increment_vram_addr();
    }

    /// `$4014`: replaces OAM with a page gathered by the caller.
    pub fn oam_dma(&mut self, page: &[u8; ppu_mem::OAM_SIZE]) {
        self.registers.load_oam(page);
    }

    /// User override forcing greyscale output.
    pub fn set_force_greyscale(&mut self, value: bool) {
        self.force_greyscale = value;
    }

    pub fn force_greyscale(&self) -> bool {
        self.force_greyscale
    }

    /// Frames finished since the last call, resetting the counter.
    pub fn take_frame_count(&mut self) -> u32 {
        std::mem::take(&mut self.frame_count)
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn vram(&self) -> &Vram {
        &self.vram
    }

    pub fn vram_mut(&mut self) -> &mut Vram {
        &mut self.vram
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    pub fn cycle(&self) -> u16 {
        self.cycles
    }

    pub fn sprites_on_line(&self) -> u8 {
        self.sprites_on_line
    }

    /// Render target, top-to-bottom.
    pub fn working_buffer(&self) -> &[u32] {
        &self.working
    }

    /// Last finished frame, bottom-to-top.
    pub fn output_buffer(&self) -> &[u32] {
        &self.output
    }

    #[inline]
    fn greyscale(&self) -> bool {
        self.registers.mask.contains(Mask::GRAYSCALE) || self.force_greyscale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Mirroring;

    fn mtu() -> Mtu {
        Mtu::new(0, Mirroring::Vertical).expect("supported mirroring")
    }

    fn run_scanlines(ppu: &mut Ppu, mtu: &Mtu, lines: u32) -> Vec<StepOutcome> {
        (0..lines * CYCLES_PER_SCANLINE as u32)
            .map(|_| ppu.step(mtu))
            .filter(|o| o.nmi || o.frame_complete)
            .collect()
    }

    #[test]
    fn scanline_advances_every_341_dots() {
        let mtu = mtu();
        let mut ppu = Ppu::new();
        for _ in 0..340 {
            ppu.step(&mtu);
        }
        assert_eq!((ppu.scanline(), ppu.cycle()), (0, 340));
        ppu.step(&mtu);
        assert_eq!((ppu.scanline(), ppu.cycle()), (1, 0));
    }

    #[test]
    fn vblank_and_nmi_on_line_240() {
        let mtu = mtu();
        let mut ppu = Ppu::new();
        ppu.write_control(0x80);
        let events = run_scanlines(&mut ppu, &mtu, 240);
        assert_eq!(
            events,
            vec![StepOutcome {
                nmi: true,
                frame_complete: true
            }]
        );
        assert_eq!(ppu.scanline(), 240);
        assert!(ppu.registers().status().contains(Status::VERTICAL_BLANK));
        assert_eq!(ppu.frame_count(), 1);

        run_scanlines(&mut ppu, &mtu, 1);
        assert!(!ppu.registers().status().contains(Status::VERTICAL_BLANK));
    }

    #[test]
    fn full_frame_wraps_and_clears_sprite_zero_hit() {
        let mtu = mtu();
        let mut ppu = Ppu::new();
        ppu.registers.status.insert(Status::SPRITE_ZERO_HIT);
        let events = run_scanlines(&mut ppu, &mtu, SCANLINES_PER_FRAME as u32);
        // NMI disabled: only the frame completion is reported.
        assert_eq!(events.len(), 1);
        assert!(!events[0].nmi);
        assert_eq!(ppu.scanline(), 0);
        assert!(!ppu.registers().status().contains(Status::SPRITE_ZERO_HIT));
        assert_eq!(ppu.take_frame_count(), 1);
        assert_eq!(ppu.frame_count(), 0);
    }

    #[test]
    fn status_read_reports_flags_and_resets_toggle() {
        let mtu = mtu();
        let mut ppu = Ppu::new();
        run_scanlines(&mut ppu, &mtu, 240);
        ppu.write_addr(0x21);
        assert_eq!(ppu.read_status() & 0x80, 0x80);
        ppu.write_addr(0x23);
        ppu.write_addr(0x45);
        assert_eq!(ppu.registers().vram_addr(), 0x2345);
    }

    #[test]
    fn data_port_buffers_non_palette_reads() {
        let mtu = mtu();
        let mut ppu = Ppu::new();
        ppu.write_addr(0x20);
        ppu.write_addr(0x00);
        ppu.write_data(&mtu, 0xAB);
        ppu.write_data(&mtu, 0xCD);

        ppu.write_addr(0x20);
        ppu.write_addr(0x00);
        assert_eq!(ppu.read_data(&mtu), 0x00);
        assert_eq!(ppu.read_data(&mtu), 0xAB);
        assert_eq!(ppu.read_data(&mtu), 0xCD);
    }

    #[test]
    fn data_port_palette_reads_are_immediate() {
        let mtu = mtu();
        let mut ppu = Ppu::new();
        ppu.write_addr(0x3F);
        ppu.write_addr(0x01);
        ppu.write_data(&mtu, 0x2A);
        ppu.write_addr(0x3F);
        ppu.write_addr(0x01);
        assert_eq!(ppu.read_data(&mtu), 0x2A);
        assert_eq!(ppu.registers().vram_addr(), 0x3F02);
    }

    #[test]
    fn data_port_increment_of_32() {
        let mtu = mtu();
        let mut ppu = Ppu::new();
        ppu.write_control(0x04);
        ppu.write_addr(0x20);
        ppu.write_addr(0x00);
        ppu.write_data(&mtu, 1);
        ppu.write_data(&mtu, 2);
        assert_eq!(ppu.vram().read(&mtu, 0x2020), 2);
        assert_eq!(ppu.registers().vram_addr(), 0x2040);
    }

    #[test]
    fn reset_clears_state_and_loads_chr() {
        let mtu = mtu();
        let mut ppu = Ppu::new();
        ppu.write_control(0xFF);
        ppu.write_oam_data(9);
        ppu.set_force_greyscale(true);
        run_scanlines(&mut ppu, &mtu, 3);
        ppu.reset(&[0x5A; 16]);
        assert_eq!(ppu.registers(), &Registers::new());
        assert_eq!((ppu.scanline(), ppu.cycle()), (0, 0));
        assert!(!ppu.force_greyscale());
        assert_eq!(ppu.vram().pattern(0, 15), 0x5A);
        assert_eq!(ppu.vram().pattern(0, 16), 0x00);
    }
}
