//! iNES header parsing.
//!
//! The first 16 bytes of every `.nes` image describe how much PRG/CHR data
//! follows, which nametable mirroring the board wires up and whether a
//! 512-byte trainer precedes the PRG data. Only the flat layout is consumed
//! by the core; the mapper number is reported but never emulated.
//!
//! NES 2.0 headers are rejected. Archaic (pre-standard) dumps are accepted
//! with their unreliable upper mapper nibble ignored.

use bitflags::bitflags;

use super::Mirroring;
use crate::error::Error;

const NES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Size of the fixed iNES header in bytes.
pub const NES_HEADER_LEN: usize = 16;
/// Size of the optional trainer block.
pub const TRAINER_LEN: usize = 0x200;
/// Unit size of the PRG ROM count byte.
pub const PRG_ROM_UNIT: usize = 0x4000;
/// Unit size of the CHR ROM count byte.
pub const CHR_ROM_UNIT: usize = 0x2000;
/// Unit size of the PRG RAM count byte.
pub const PRG_RAM_UNIT: usize = 0x2000;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags6: u8 {
        const MIRRORING        = 0b0000_0001;
        const BATTERY          = 0b0000_0010;
        const TRAINER          = 0b0000_0100;
        const FOUR_SCREEN      = 0b0000_1000;
        const MAPPER_LOW_MASK  = 0b1111_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags7: u8 {
        const VS_UNISYSTEM     = 0b0000_0001;
        const PLAYCHOICE_10    = 0b0000_0010;
        const NES2_DETECTION   = 0b0000_1100;
        const MAPPER_HIGH_MASK = 0b1111_0000;
    }
}

/// Identifies the header flavour encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomFormat {
    /// The original iNES 1.0 layout.
    INes,
    /// NES 2.0 with extended sizing and metadata fields.
    Nes20,
    /// Dumps that pre-date the iNES standard (garbage in bytes 12-15).
    Archaic,
}

impl RomFormat {
    fn detect(bytes: &[u8], flags7: Flags7) -> Self {
        match flags7.bits() & Flags7::NES2_DETECTION.bits() {
            0b1000 => Self::Nes20,
            0b0000 if bytes[12..16].iter().all(|&b| b == 0) => Self::INes,
            _ => Self::Archaic,
        }
    }
}

/// Parsed iNES header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Detected header flavour.
    pub format: RomFormat,
    /// Mapper ID (0 == NROM). Anything else is reported, not emulated.
    pub mapper: u8,
    /// How the PPU nametables are mirrored.
    pub mirroring: Mirroring,
    /// Battery bit: the board keeps `$6000-$7FFF` alive when powered off.
    pub battery_backed_ram: bool,
    /// Whether the 512-byte trainer block sits between header and PRG data.
    pub trainer_present: bool,
    /// Amount of PRG ROM in bytes.
    pub prg_rom_size: usize,
    /// Amount of CHR ROM in bytes.
    pub chr_rom_size: usize,
    /// PRG RAM size in bytes, at least one 8 KiB unit.
    pub prg_ram_size: usize,
}

impl Header {
    /// Parse an iNES header from the given byte slice.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < NES_HEADER_LEN {
            return Err(Error::TooShort {
                actual: bytes.len(),
            });
        }

        if &bytes[0..4] != NES_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let flags6 = Flags6::from_bits_truncate(bytes[6]);
        let flags7 = Flags7::from_bits_truncate(bytes[7]);
        let format = RomFormat::detect(bytes, flags7);

        let mapper_low = flags6.bits() >> 4;
        let (mapper, prg_ram_units) = match format {
            RomFormat::Nes20 => return Err(Error::UnsupportedFormat(format)),
            RomFormat::INes => (mapper_low | (flags7.bits() & 0xF0), bytes[8].max(1)),
            RomFormat::Archaic => (mapper_low, 1),
        };

        Ok(Self {
            format,
            mapper,
            mirroring: resolve_mirroring(flags6),
            battery_backed_ram: flags6.contains(Flags6::BATTERY),
            trainer_present: flags6.contains(Flags6::TRAINER),
            prg_rom_size: bytes[4] as usize * PRG_ROM_UNIT,
            chr_rom_size: bytes[5] as usize * CHR_ROM_UNIT,
            prg_ram_size: prg_ram_units as usize * PRG_RAM_UNIT,
        })
    }
}

fn resolve_mirroring(flags6: Flags6) -> Mirroring {
    if flags6.contains(Flags6::FOUR_SCREEN) {
        Mirroring::FourScreen
    } else if flags6.contains(Flags6::MIRRORING) {
        Mirroring::Vertical
    } else {
        Mirroring::Horizontal
    }
}
