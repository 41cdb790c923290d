use crate::cartridge::{Mirroring, header::NES_HEADER_LEN, header::RomFormat};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Provided buffer is shorter than the 16-byte header.
    #[error("header expected {NES_HEADER_LEN} bytes, got {actual}")]
    TooShort { actual: usize },
    /// Magic number ("NES<EOF>") is missing.
    #[error("missing NES magic bytes")]
    InvalidMagic,
    /// Header advertises a format we do not implement.
    #[error("unsupported iNES header format: {0:?}")]
    UnsupportedFormat(RomFormat),
    /// A ROM section (trainer/PRG/CHR) is shorter than advertised.
    #[error("{section} section expected {expected} bytes, got {actual}")]
    SectionTooShort {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The nametable layout cannot be expressed with two physical tables.
    #[error("{0:?} nametable mirroring is not supported")]
    UnsupportedMirroring(Mirroring),
    /// Wrapper for I/O errors raised while reading cartridges from disk.
    #[error("i/o error while reading cartridge: {0}")]
    Io(#[from] std::io::Error),
}
