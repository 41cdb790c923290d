//! Cartridge assets consumed at power-on.
//!
//! A translated program ships its PRG bytes (data tables the code still reads
//! through the bus), its CHR tile graphics and the board's nametable wiring.
//! These can come straight from the program or be sliced out of an iNES image.

pub mod header;

use std::{fs, path::Path};

use tracing::warn;

use crate::error::Error;
use header::{Header, NES_HEADER_LEN, TRAINER_LEN};

/// Nametable mirroring wired by the cartridge board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirroring {
    /// Top slots share one physical table, bottom slots the other.
    Horizontal,
    /// Left slots share one physical table, right slots the other.
    Vertical,
    /// Cartridge supplies its own four nametables.
    FourScreen,
    /// All four slots map to a single table.
    OneScreen,
}

/// PRG/CHR image plus board wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    mirroring: Mirroring,
    mapper: u8,
}

impl Cartridge {
    pub fn new(
        prg_rom: impl Into<Vec<u8>>,
        chr_rom: impl Into<Vec<u8>>,
        mirroring: Mirroring,
    ) -> Self {
        Self {
            prg_rom: prg_rom.into(),
            chr_rom: chr_rom.into(),
            mirroring,
            mapper: 0,
        }
    }

    /// Slices an iNES image into its PRG and CHR sections.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let header = Header::parse(bytes)?;
        if header.mapper != 0 {
            warn!(
                mapper = header.mapper,
                "cartridge mapper hardware is not emulated, using flat layout"
            );
        }

        let mut cursor = NES_HEADER_LEN;
        if header.trainer_present {
            cursor += TRAINER_LEN;
        }
        let prg_rom = take_section(bytes, &mut cursor, "PRG ROM", header.prg_rom_size)?;
        let chr_rom = take_section(bytes, &mut cursor, "CHR ROM", header.chr_rom_size)?;

        Ok(Self {
            prg_rom,
            chr_rom,
            mirroring: header.mirroring,
            mapper: header.mapper,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn mapper(&self) -> u8 {
        self.mapper
    }
}

fn take_section(
    bytes: &[u8],
    cursor: &mut usize,
    section: &'static str,
    len: usize,
) -> Result<Vec<u8>, Error> {
    let start = (*cursor).min(bytes.len());
    let end = start + len;
    let Some(data) = bytes.get(start..end) else {
        return Err(Error::SectionTooShort {
            section,
            expected: len,
            actual: bytes.len() - start,
        });
    };
    *cursor = end;
    Ok(data.to_vec())
}
