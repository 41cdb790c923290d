//! Address constants for the processor and PPU spaces, shared by the MTU,
//! the register dispatcher and the renderer.

/// Size of one CPU memory page.
pub const PAGE_SIZE: usize = 0x100;

/// CPU memory map details.
pub mod cpu {
    /// Zero page window (`$0000-$00FF`).
    pub const ZERO_PAGE_START: u16 = 0x0000;
    pub const ZERO_PAGE_END: u16 = 0x0100;

    /// Hardware stack page (`$0100-$01FF`).
    pub const STACK_PAGE_START: u16 = 0x0100;
    pub const STACK_PAGE_END: u16 = 0x0200;

    /// General purpose work RAM following the stack page (`$0200-$07FF`).
    pub const RAM_START: u16 = 0x0200;
    pub const RAM_END: u16 = 0x0800;

    /// Size of the CPU internal RAM block (2 KiB mirrored through `$1FFF`).
    pub const INTERNAL_RAM_SIZE: u16 = 0x0800;
    /// Exclusive end of the mirrored internal RAM window.
    pub const INTERNAL_RAM_MIRROR_END: u16 = 0x2000;

    /// First CPU address mapped to the PPU register set.
    pub const PPU_REGISTER_BASE: u16 = 0x2000;
    /// Mirrors of the eight PPU registers are folded for addresses strictly
    /// between this address and [`PPU_REGISTER_MIRROR_END`].
    pub const PPU_REGISTER_MIRROR_START: u16 = 0x2008;
    pub const PPU_REGISTER_MIRROR_END: u16 = 0x3000;
    /// Number of distinct PPU registers.
    pub const PPU_REGISTER_COUNT: u16 = 8;

    /// Controller port 1 read / shared strobe write (`$4016`).
    pub const CONTROLLER_PORT_1: u16 = 0x4016;
    /// Controller port 2 read (`$4017`); writes land on the APU frame counter.
    pub const CONTROLLER_PORT_2: u16 = 0x4017;

    /// Battery/save RAM window (`$6000-$7FFF`).
    pub const SRAM_START: u16 = 0x6000;
    pub const SRAM_END: u16 = 0x8000;
    pub const SRAM_SIZE: usize = 0x2000;

    /// PRG ROM window start address (`$8000`).
    pub const PRG_ROM_START: u16 = 0x8000;
    /// Second 16 KiB PRG bank (`$C000`), mirrors the first for single-bank images.
    pub const PRG_ROM_SECOND_BANK: u16 = 0xC000;
    /// Size of one PRG bank.
    pub const PRG_ROM_BANK_SIZE: usize = 0x4000;
    /// Exclusive end of the CPU address space.
    pub const ADDRESS_SPACE_END: u32 = 0x1_0000;

    /// Size of the fallback buffer backing addresses without any mapping.
    pub const UNMAPPED_SIZE: usize = ADDRESS_SPACE_END as usize;

    /// `true` for addresses below the cartridge ROM window.
    #[inline]
    pub const fn is_system_memory(addr: u16) -> bool {
        addr < PRG_ROM_START
    }
}

/// PPU address space layout and CPU-visible register identifiers.
pub mod ppu {
    /// Address mask applied to fold the 64 KiB bus onto the 16 KiB PPU space.
    pub const ADDRESS_SPACE_SIZE: u16 = 0x4000;

    /// Pattern tables (`$0000-$1FFF`).
    pub const PATTERN_TABLE_START: u16 = 0x0000;
    pub const PATTERN_TABLE_END: u16 = 0x2000;
    /// Size of a single pattern table (4 KiB).
    pub const PATTERN_TABLE_SIZE: usize = 0x1000;
    /// Total size of both pattern tables.
    pub const CHR_SIZE: usize = 0x2000;

    /// Logical nametable slots (`$2000-$2FFF`).
    pub const NAMETABLE_START: u16 = 0x2000;
    pub const NAMETABLE_END: u16 = 0x3000;
    /// Size of a single nametable in bytes (960 cells + 64 attribute bytes).
    pub const NAMETABLE_SIZE: usize = 0x0400;
    /// Tile cells per nametable.
    pub const NAMETABLE_CELLS: usize = 960;
    /// Number of physical nametables backed by console VRAM.
    pub const PHYSICAL_NAMETABLES: usize = 2;
    /// `$3000-$3EFF` folds back onto `$2000-$2EFF`.
    pub const NAMETABLE_MIRROR_START: u16 = 0x3000;

    /// Palette window (`$3F00-$3FFF`).
    pub const PALETTE_START: u16 = 0x3F00;
    pub const PALETTE_END: u16 = 0x4000;
    /// Palette mirroring period.
    pub const PALETTE_STRIDE: u16 = 0x20;

    /// Object Attribute Memory byte count (64 entries of 4 bytes).
    pub const OAM_SIZE: usize = 0x100;
    /// Number of sprite entries in OAM.
    pub const OAM_ENTRIES: usize = 0x40;

    /// DMA register used for transferring OAM data (`$4014`).
    pub const OAM_DMA: u16 = 0x4014;

    /// CPU-visible PPU register identifiers.
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// `$2000` - PPUCTRL
        Control = 0x2000,
        /// `$2001` - PPUMASK
        Mask = 0x2001,
        /// `$2002` - PPUSTATUS
        Status = 0x2002,
        /// `$2003` - OAMADDR
        OamAddr = 0x2003,
        /// `$2004` - OAMDATA
        OamData = 0x2004,
        /// `$2005` - PPUSCROLL
        Scroll = 0x2005,
        /// `$2006` - PPUADDR
        Addr = 0x2006,
        /// `$2007` - PPUDATA
        Data = 0x2007,
    }

    impl Register {
        /// Raw address backing the register.
        pub const fn addr(self) -> u16 {
            self as u16
        }

        /// Resolves a non-mirrored CPU address to a PPU register.
        ///
        /// Only `$2000-$2007` resolve; mirror folding happens before dispatch.
        pub const fn from_cpu_addr(addr: u16) -> Option<Self> {
            match addr {
                0x2000 => Some(Self::Control),
                0x2001 => Some(Self::Mask),
                0x2002 => Some(Self::Status),
                0x2003 => Some(Self::OamAddr),
                0x2004 => Some(Self::OamData),
                0x2005 => Some(Self::Scroll),
                0x2006 => Some(Self::Addr),
                0x2007 => Some(Self::Data),
                _ => None,
            }
        }
    }
}

/// Audio register window.
///
/// No sound hardware sits behind it. Writes are swallowed and `$4015` reads
/// back as zero.
pub mod apu {
    pub const STATUS: u16 = 0x4015;
    /// Shares its address with controller port 2, which owns the read side.
    pub const FRAME_COUNTER: u16 = 0x4017;

    /// `true` for the addresses the audio unit decodes on writes: the channel
    /// block minus its two unused slots, status and the frame counter.
    pub const fn is_register(addr: u16) -> bool {
        matches!(
            addr,
            0x4000..=0x4008 | 0x400A..=0x400C | 0x400E..=0x4013 | STATUS | FRAME_COUNTER
        )
    }
}
