//! Memory Translation Unit.
//!
//! Maps 16-bit addresses of the processor and PPU spaces onto backing byte
//! regions. Each space is described by an ordered table of disjoint
//! `[start, end)` ranges bound to a region identifier and an offset into that
//! region; lookups are a linear scan returning the first match.
//!
//! Hardware mirroring is *not* applied here: callers fold addresses with
//! [`cpu_non_mirrored_addr`] / [`ppu_non_mirrored_addr`] first and translate
//! the result. Addresses without a static mapping yield `None` and fall
//! through to the register dispatcher.

use crate::{
    cartridge::Mirroring,
    error::Error,
    memory::{cpu as cpu_mem, ppu as ppu_mem},
};

/// The two independent address spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    Cpu,
    Ppu,
}

/// Backing regions of the processor-visible space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuRegion {
    ZeroPage,
    StackPage,
    WorkRam,
    Sram,
    PrgRom,
}

/// Backing regions of the PPU-visible space.
///
/// Palette regions are flat: background/sprite palette `p`, entry `e` lives
/// at offset `p * 3 + e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PpuRegion {
    PatternTables,
    /// Physical nametable index (0 or 1).
    Nametable(usize),
    UniversalBackground,
    BackgroundPalettes,
    SpritePalettes,
    PaletteUnused,
}

/// Region of either space, as returned by [`Mtu::translate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Cpu(CpuRegion),
    Ppu(PpuRegion),
}

/// A resolved backing byte: the owning region plus an offset inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot<R> {
    pub region: R,
    pub offset: usize,
}

/// One entry of a translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping<R> {
    pub start: u32,
    pub end: u32,
    pub region: R,
    pub offset: usize,
}

impl<R: Copy> Mapping<R> {
    pub const fn new(start: u32, end: u32, region: R, offset: usize) -> Self {
        Self {
            start,
            end,
            region,
            offset,
        }
    }

    #[inline]
    fn resolve(&self, addr: u16) -> Option<Slot<R>> {
        let addr = addr as u32;
        (addr >= self.start && addr < self.end).then(|| Slot {
            region: self.region,
            offset: self.offset + (addr - self.start) as usize,
        })
    }
}

/// Static processor-space table. `$0800-$1FFF` is reached through mirroring.
pub const CPU_SYSTEM_TABLE: [Mapping<CpuRegion>; 4] = [
    Mapping::new(0x0000, 0x0100, CpuRegion::ZeroPage, 0),
    Mapping::new(0x0100, 0x0200, CpuRegion::StackPage, 0),
    Mapping::new(0x0200, 0x0800, CpuRegion::WorkRam, 0),
    Mapping::new(0x6000, 0x8000, CpuRegion::Sram, 0),
];

/// Static PPU-space table. Nametables are resolved dynamically and the
/// sprite palette slot 0 addresses are folded by [`ppu_non_mirrored_addr`].
pub const PPU_TABLE: [Mapping<PpuRegion>; 13] = [
    Mapping::new(0x0000, 0x2000, PpuRegion::PatternTables, 0),
    Mapping::new(0x3F00, 0x3F01, PpuRegion::UniversalBackground, 0),
    Mapping::new(0x3F01, 0x3F04, PpuRegion::BackgroundPalettes, 0),
    Mapping::new(0x3F04, 0x3F05, PpuRegion::PaletteUnused, 0),
    Mapping::new(0x3F05, 0x3F08, PpuRegion::BackgroundPalettes, 3),
    Mapping::new(0x3F08, 0x3F09, PpuRegion::PaletteUnused, 1),
    Mapping::new(0x3F09, 0x3F0C, PpuRegion::BackgroundPalettes, 6),
    Mapping::new(0x3F0C, 0x3F0D, PpuRegion::PaletteUnused, 2),
    Mapping::new(0x3F0D, 0x3F10, PpuRegion::BackgroundPalettes, 9),
    Mapping::new(0x3F11, 0x3F14, PpuRegion::SpritePalettes, 0),
    Mapping::new(0x3F15, 0x3F18, PpuRegion::SpritePalettes, 3),
    Mapping::new(0x3F19, 0x3F1C, PpuRegion::SpritePalettes, 6),
    Mapping::new(0x3F1D, 0x3F20, PpuRegion::SpritePalettes, 9),
];

/// Folds processor-space mirrors onto their canonical address.
///
/// - `$0000-$1FFF` reduces modulo `$0800`.
/// - `($2008, $3000)` reduces to `$2000 + addr % 8`. `$2008` itself is left
///   untouched and `$3000-$3FFF` is not folded.
pub const fn cpu_non_mirrored_addr(addr: u16) -> u16 {
    if addr < cpu_mem::INTERNAL_RAM_MIRROR_END {
        addr % cpu_mem::INTERNAL_RAM_SIZE
    } else if addr > cpu_mem::PPU_REGISTER_MIRROR_START && addr < cpu_mem::PPU_REGISTER_MIRROR_END
    {
        cpu_mem::PPU_REGISTER_BASE + addr % cpu_mem::PPU_REGISTER_COUNT
    } else {
        addr
    }
}

/// Folds PPU-space mirrors onto their canonical address.
pub const fn ppu_non_mirrored_addr(addr: u16) -> u16 {
    let addr = addr % ppu_mem::ADDRESS_SPACE_SIZE;
    if addr >= ppu_mem::PALETTE_START && addr < ppu_mem::PALETTE_END {
        let addr = addr % ppu_mem::PALETTE_STRIDE + ppu_mem::PALETTE_START;
        // Sprite palette entry 0 aliases the background entry of the same group.
        match addr {
            0x3F10 => 0x3F00,
            0x3F14 => 0x3F04,
            0x3F18 => 0x3F08,
            0x3F1C => 0x3F0C,
            other => other,
        }
    } else if addr >= ppu_mem::NAMETABLE_MIRROR_START && addr < ppu_mem::PALETTE_START {
        addr - ppu_mem::NAMETABLE_MIRROR_START + ppu_mem::NAMETABLE_START
    } else {
        addr
    }
}

/// Builds the cartridge ROM table for a PRG image of `prg_len` bytes.
///
/// Single-bank images (16 KiB or less) also appear at `$C000`.
pub fn game_table(prg_len: usize) -> Vec<Mapping<CpuRegion>> {
    let start = cpu_mem::PRG_ROM_START as u32;
    let window = cpu_mem::ADDRESS_SPACE_END - start;
    let len = (prg_len as u32).min(window);
    if len == 0 {
        return Vec::new();
    }

    let mut table = vec![Mapping::new(start, start + len, CpuRegion::PrgRom, 0)];
    if prg_len <= cpu_mem::PRG_ROM_BANK_SIZE {
        let mirror = cpu_mem::PRG_ROM_SECOND_BANK as u32;
        table.push(Mapping::new(mirror, mirror + len, CpuRegion::PrgRom, 0));
    }
    table
}

/// Logical-to-physical nametable assignment for a mirroring mode.
///
/// Slots are ordered top-left, top-right, bottom-left, bottom-right.
pub fn nametable_layout(mirroring: Mirroring) -> Result<[usize; 4], Error> {
    match mirroring {
        Mirroring::Horizontal => Ok([0, 0, 1, 1]),
        Mirroring::Vertical => Ok([0, 1, 0, 1]),
        other => Err(Error::UnsupportedMirroring(other)),
    }
}

/// The translation tables of both spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mtu {
    game: Vec<Mapping<CpuRegion>>,
    nametables: [usize; 4],
}

impl Mtu {
    pub fn new(prg_len: usize, mirroring: Mirroring) -> Result<Self, Error> {
        Ok(Self {
            game: game_table(prg_len),
            nametables: nametable_layout(mirroring)?,
        })
    }

    /// Translates an already non-mirrored address of either space.
    pub fn translate(&self, space: Space, addr: u16) -> Option<Slot<Region>> {
        match space {
            Space::Cpu => self.translate_cpu(addr).map(|slot| Slot {
                region: Region::Cpu(slot.region),
                offset: slot.offset,
            }),
            Space::Ppu => self.translate_ppu(addr).map(|slot| Slot {
                region: Region::Ppu(slot.region),
                offset: slot.offset,
            }),
        }
    }

    pub fn translate_cpu(&self, addr: u16) -> Option<Slot<CpuRegion>> {
        let table: &[Mapping<CpuRegion>] = if cpu_mem::is_system_memory(addr) {
            &CPU_SYSTEM_TABLE
        } else {
            &self.game
        };
        table.iter().find_map(|mapping| mapping.resolve(addr))
    }

    pub fn translate_ppu(&self, addr: u16) -> Option<Slot<PpuRegion>> {
        if (ppu_mem::NAMETABLE_START..ppu_mem::NAMETABLE_END).contains(&addr) {
            let rel = (addr - ppu_mem::NAMETABLE_START) as usize;
            return Some(Slot {
                region: PpuRegion::Nametable(self.nametables[rel / ppu_mem::NAMETABLE_SIZE]),
                offset: rel % ppu_mem::NAMETABLE_SIZE,
            });
        }
        PPU_TABLE.iter().find_map(|mapping| mapping.resolve(addr))
    }

    /// Physical nametable backing logical slot `index` (0..4).
    #[inline]
    pub fn nametable(&self, index: usize) -> usize {
        self.nametables[index & 3]
    }

    pub fn game_table(&self) -> &[Mapping<CpuRegion>] {
        &self.game
    }
}
