use bitflags::bitflags;

use crate::memory::ppu as ppu_mem;

/// Sprite width in pixels.
pub const SPRITE_WIDTH: usize = 8;
/// Height of one sprite tile.
pub const SPRITE_HEIGHT: usize = 8;

bitflags! {
    /// Sprite attribute byte (OAM byte 2).
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// V H P . . . p p
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SpriteAttributes: u8 {
        /// Sprite palette select (0..3).
        const PALETTE = 0b0000_0011;
        /// Drawn behind the background when set.
        const BEHIND_BACKGROUND = 0b0010_0000;
        const FLIP_HORIZONTAL = 0b0100_0000;
        const FLIP_VERTICAL = 0b1000_0000;
    }
}

impl SpriteAttributes {
    pub fn palette(self) -> usize {
        (self.bits() & Self::PALETTE.bits()) as usize
    }

    pub fn behind_background(self) -> bool {
        self.contains(Self::BEHIND_BACKGROUND)
    }

    pub fn flip_horizontal(self) -> bool {
        self.contains(Self::FLIP_HORIZONTAL)
    }

    pub fn flip_vertical(self) -> bool {
        self.contains(Self::FLIP_VERTICAL)
    }
}

/// One decoded OAM entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sprite {
    /// Top edge minus one, as stored in OAM.
    pub y: u8,
    pub tile: u8,
    pub attributes: SpriteAttributes,
    pub x: u8,
}

impl Sprite {
    /// Decodes entry `index` (0..64) of an OAM image.
    pub fn from_oam(oam: &[u8], index: usize) -> Self {
        let base = index * 4;
        Self {
            y: oam[base],
            tile: oam[base + 1],
            attributes: SpriteAttributes::from_bits_retain(oam[base + 2]),
            x: oam[base + 3],
        }
    }

    /// Screen row of the first line. The stored value is one less, wrapping
    /// within a byte.
    #[inline]
    pub fn top(&self) -> u8 {
        self.y.wrapping_add(1)
    }

    /// `true` when the sprite covers `scanline` for the given height.
    #[inline]
    pub fn covers(&self, scanline: usize, height: usize) -> bool {
        let top = self.top() as usize;
        top <= scanline && scanline < top + height
    }

    /// Pattern table, tile index and row inside that tile for `scanline`.
    ///
    /// In 8x16 mode the table comes from bit 0 of the tile id and a vertical
    /// flip spans both halves.
    pub fn tile_row(
        &self,
        scanline: usize,
        height: usize,
        sprite_table: usize,
    ) -> (usize, usize, usize) {
        let top = self.top() as usize;
        let mut row = if self.attributes.flip_vertical() {
            top + height - (scanline + 1)
        } else {
            scanline - top
        };
        let mut tile = self.tile as usize;
        let mut table = sprite_table;
        if height > SPRITE_HEIGHT {
            table = tile & 1;
            tile &= !1;
            if row >= SPRITE_HEIGHT {
                tile += 1;
                row -= SPRITE_HEIGHT;
            }
        }
        (table, tile, row)
    }
}

/// Iterates OAM from the last entry to the first, so entry 0 draws on top.
pub fn back_to_front(oam: &[u8]) -> impl Iterator<Item = (usize, Sprite)> + '_ {
    (0..ppu_mem::OAM_ENTRIES)
        .rev()
        .map(move |index| (index, Sprite::from_oam(oam, index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(y: u8, tile: u8, attributes: u8) -> Sprite {
        Sprite {
            y,
            tile,
            attributes: SpriteAttributes::from_bits_retain(attributes),
            x: 0,
        }
    }

    #[test]
    fn y_is_off_by_one() {
        let s = sprite(9, 0, 0);
        assert!(!s.covers(9, 8));
        assert!(s.covers(10, 8));
        assert!(s.covers(17, 8));
        assert!(!s.covers(18, 8));
    }

    #[test]
    fn stored_y_of_ff_wraps_to_top() {
        let s = sprite(0xFF, 0, 0);
        assert!(s.covers(0, 8));
    }

    #[test]
    fn tall_sprite_picks_table_from_tile_bit() {
        let s = sprite(0, 0x13, 0);
        assert_eq!(s.tile_row(1, 16, 0), (1, 0x12, 0));
        assert_eq!(s.tile_row(10, 16, 0), (1, 0x13, 1));
    }

    #[test]
    fn vertical_flip_spans_both_halves() {
        let s = sprite(0, 0x20, 0x80);
        // Top line of the box shows the last row of the bottom tile.
        assert_eq!(s.tile_row(1, 16, 1), (0, 0x21, 7));
        assert_eq!(s.tile_row(16, 16, 1), (0, 0x20, 0));
        // 8x8 uses the control register table.
        assert_eq!(s.tile_row(1, 8, 1), (1, 0x20, 7));
    }

    #[test]
    fn iteration_is_back_to_front() {
        let mut oam = [0u8; 0x100];
        oam[1] = 0xAA;
        oam[0xFD] = 0xBB;
        let order: Vec<_> = back_to_front(&oam).map(|(i, s)| (i, s.tile)).collect();
        assert_eq!(order.first(), Some(&(63, 0xBB)));
        assert_eq!(order.last(), Some(&(0, 0xAA)));
    }
}
