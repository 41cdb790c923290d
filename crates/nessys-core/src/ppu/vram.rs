//! PPU-side backing storage and the `$0000-$3FFF` bus built on top of it.

use tracing::debug;

use crate::{
    memory::ppu as ppu_mem,
    mtu::{Mtu, PpuRegion, ppu_non_mirrored_addr},
    ram::ppu::{Nametable, PatternTables},
};

/// Entries per background or sprite palette (entry 0 is shared).
pub const PALETTE_ENTRIES: usize = 3;
/// Palettes per layer.
pub const PALETTES: usize = 4;

/// Pattern tables, physical nametables and palette RAM.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vram {
    pattern_tables: PatternTables,
    nametables: [Nametable; ppu_mem::PHYSICAL_NAMETABLES],
    universal_background: [u8; 1],
    background_palettes: [u8; PALETTES * PALETTE_ENTRIES],
    sprite_palettes: [u8; PALETTES * PALETTE_ENTRIES],
    palette_unused: [u8; 3],
}

impl Default for Vram {
    fn default() -> Self {
        Self::new()
    }
}

impl Vram {
    pub fn new() -> Self {
        Self {
            pattern_tables: PatternTables::new(),
            nametables: [Nametable::new(), Nametable::new()],
            universal_background: [0],
            background_palettes: [0; PALETTES * PALETTE_ENTRIES],
            sprite_palettes: [0; PALETTES * PALETTE_ENTRIES],
            palette_unused: [0; 3],
        }
    }

    /// Clears everything, then loads up to 8 KiB of CHR into the pattern tables.
    pub fn reset(&mut self, chr: &[u8]) {
        *self = Self::new();
        let len = chr.len().min(ppu_mem::CHR_SIZE);
        self.pattern_tables[..len].copy_from_slice(&chr[..len]);
    }

    fn region(&self, region: PpuRegion) -> &[u8] {
        match region {
            PpuRegion::PatternTables => &self.pattern_tables,
            PpuRegion::Nametable(index) => &self.nametables[index],
            PpuRegion::UniversalBackground => &self.universal_background,
            PpuRegion::BackgroundPalettes => &self.background_palettes,
            PpuRegion::SpritePalettes => &self.sprite_palettes,
            PpuRegion::PaletteUnused => &self.palette_unused,
        }
    }

    fn region_mut(&mut self, region: PpuRegion) -> &mut [u8] {
        match region {
            PpuRegion::PatternTables => &mut self.pattern_tables,
            PpuRegion::Nametable(index) => &mut self.nametables[index],
            PpuRegion::UniversalBackground => &mut self.universal_background,
            PpuRegion::BackgroundPalettes => &mut self.background_palettes,
            PpuRegion::SpritePalettes => &mut self.sprite_palettes,
            PpuRegion::PaletteUnused => &mut self.palette_unused,
        }
    }

    /// Reads a byte of PPU address space, applying mirroring.
    pub fn read(&self, mtu: &Mtu, addr: u16) -> u8 {
        match mtu.translate_ppu(ppu_non_mirrored_addr(addr)) {
            Some(slot) => self.region(slot.region)[slot.offset],
            None => {
                debug!(target: "nessys_core::mtu", "unmapped PPU read at {addr:#06x}");
                0
            }
        }
    }

    /// Writes a byte of PPU address space, applying mirroring.
    pub fn write(&mut self, mtu: &Mtu, addr: u16, value: u8) {
        match mtu.translate_ppu(ppu_non_mirrored_addr(addr)) {
            Some(slot) => self.region_mut(slot.region)[slot.offset] = value,
            None => {
                debug!(target: "nessys_core::mtu", "unmapped PPU write at {addr:#06x}");
            }
        }
    }

    /// Byte `offset` of pattern table `table` (0 or 1).
    #[inline]
    pub fn pattern(&self, table: usize, offset: usize) -> u8 {
        self.pattern_tables[table * ppu_mem::PATTERN_TABLE_SIZE + offset]
    }

    pub fn pattern_tables(&self) -> &[u8] {
        &self.pattern_tables
    }

    /// Physical nametable `index` (0 or 1).
    #[inline]
    pub fn nametable(&self, index: usize) -> &[u8] {
        &self.nametables[index]
    }

    pub fn universal_background(&self) -> u8 {
        self.universal_background[0]
    }

    /// Entry `entry` (1..=3) of background palette `palette`.
    #[inline]
    pub fn background_color(&self, palette: usize, entry: usize) -> u8 {
        self.background_palettes[palette * PALETTE_ENTRIES + entry - 1]
    }

    /// Entry `entry` (1..=3) of sprite palette `palette`.
    #[inline]
    pub fn sprite_color(&self, palette: usize, entry: usize) -> u8 {
        self.sprite_palettes[palette * PALETTE_ENTRIES + entry - 1]
    }
}
