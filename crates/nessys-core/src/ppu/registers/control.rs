use bitflags::bitflags;

bitflags! {
    /// `$2000` PPUCTRL.
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// N M S B s I n n
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Control: u8 {
        /// Base nametable. Latched on its own in
        /// [`super::Registers::base_nametable`] at write time.
        const NAMETABLE = 0b0000_0011;
        /// `$2007` steps by 32 (one row) instead of 1.
        const INCREMENT_32 = 0b0000_0100;
        const SPRITE_TABLE = 0b0000_1000;
        const BACKGROUND_TABLE = 0b0001_0000;
        const SPRITE_SIZE_16 = 0b0010_0000;
        /// Only its first write is remembered, see
        /// [`super::MasterSlave`].
        const MASTER_SLAVE = 0b0100_0000;
        const GENERATE_NMI = 0b1000_0000;
    }
}

impl Control {
    pub fn vram_increment(self) -> u16 {
        if self.contains(Self::INCREMENT_32) {
            32
        } else {
            1
        }
    }

    /// 0 or 1.
    pub fn sprite_pattern_table(self) -> usize {
        usize::from(self.contains(Self::SPRITE_TABLE))
    }

    /// 0 or 1.
    pub fn background_pattern_table(self) -> usize {
        usize::from(self.contains(Self::BACKGROUND_TABLE))
    }

    pub fn use_8x16_sprites(self) -> bool {
        self.contains(Self::SPRITE_SIZE_16)
    }

    pub fn nmi_enabled(self) -> bool {
        self.contains(Self::GENERATE_NMI)
    }
}
