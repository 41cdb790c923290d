use bitflags::bitflags;

bitflags! {
    /// PPU status register (`$2002`).
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// V S O . . . . .
    /// ```
    /// - `V`: Vertical blank flag
    /// - `S`: Sprite zero hit
    /// - `O`: Sprite overflow flag
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// More than eight sprites intersected the last rendered scanline.
        const SPRITE_OVERFLOW = 0b0010_0000;

        /// An opaque pixel of sprite 0 was drawn this frame.
        const SPRITE_ZERO_HIT = 0b0100_0000;

        /// The scanline counter sits on the vblank line.
        const VERTICAL_BLANK = 0b1000_0000;
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::empty()
    }
}
